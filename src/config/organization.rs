use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub organization: Organization,
    pub api: ApiSettings,
    pub pdf: PdfSettings,
    #[serde(default)]
    pub share: ShareSettings,
}

/// Identity lines printed on every generated document.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Organization {
    /// Full organization name, centered on page-width documents.
    pub name: String,
    /// Short name used on the narrow receipt title line.
    pub short_name: String,
    /// Issuing authority printed on receipts ("Issuer: ...").
    pub issuer: String,
    /// Region line printed under the organization name on stock reports.
    pub region: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    /// Bearer token for the supply API. Auth enforcement itself lives
    /// upstream; the token is opaque here.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}

/// Optional share handler. Left unset, share actions fail with a
/// capability error instead of silently doing nothing.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ShareSettings {
    /// Command template with `{file}` and `{caption}` placeholders.
    #[serde(default)]
    pub command: Option<String>,
}
