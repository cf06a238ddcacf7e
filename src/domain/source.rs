//! Built-in threat-intelligence sources.

use std::fmt;

/// An external threat-intelligence provider queried by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatSource {
    /// AlienVault OTX network indicator feed.
    AlienVault,
    /// VirusTotal malware analysis feed.
    VirusTotal,
}

impl ThreatSource {
    /// Sources in the order their batches appear in the aggregate result.
    pub const ALL: [ThreatSource; 2] = [ThreatSource::AlienVault, ThreatSource::VirusTotal];

    /// Key under `api_keys` and `sources` in the config document.
    pub fn config_key(&self) -> &'static str {
        match self {
            ThreatSource::AlienVault => "alien_vault",
            ThreatSource::VirusTotal => "virus_total",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ThreatSource::AlienVault => "https://otx.alienvault.com/api/v1",
            ThreatSource::VirusTotal => "https://www.virustotal.com/api/v3",
        }
    }

    /// Header carrying the API key.
    pub fn auth_header(&self) -> &'static str {
        match self {
            ThreatSource::AlienVault => "X-OTX-API-KEY",
            ThreatSource::VirusTotal => "x-apikey",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ThreatSource::AlienVault => "indicators/export",
            ThreatSource::VirusTotal => "files",
        }
    }

    /// Whether the endpoint is a listing that takes a `limit` parameter.
    pub fn is_paged(&self) -> bool {
        matches!(self, ThreatSource::VirusTotal)
    }
}

impl fmt::Display for ThreatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}
