//! Remote content store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::image::ImageUrlBuilder;

/// Connection settings for the Sanity content lake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2024-01-01` (no leading `v`).
    pub api_version: String,
    /// Read through the edge cache (`apicdn`) instead of the live API.
    pub use_cdn: bool,
    /// Per-request timeout for remote queries.
    #[serde(with = "secs")]
    pub timeout: Duration,
    /// Width constraint applied to every resolved image URL.
    pub image_width: u32,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: "37uuhcx4".into(),
            dataset: "production".into(),
            api_version: "2024-01-01".into(),
            use_cdn: true,
            timeout: Duration::from_secs(10),
            image_width: 1200,
        }
    }
}

impl SanityConfig {
    /// Query endpoint for this project and dataset.
    ///
    /// `https://<project>.apicdn.sanity.io/v2024-01-01/data/query/production`
    pub fn query_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.project_id,
            host,
            self.api_version.trim_start_matches('v'),
            self.dataset
        )
    }

    pub fn image_builder(&self) -> ImageUrlBuilder {
        ImageUrlBuilder::new(&self.project_id, &self.dataset)
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
