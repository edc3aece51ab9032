//! Image asset reference → CDN URL.
//!
//! Asset references look like `image-<assetId>-<width>x<height>-<format>`,
//! e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`. The CDN serves them at
//! `https://cdn.sanity.io/images/<project>/<dataset>/<assetId>-<w>x<h>.<format>`.

use tracing::warn;

const CDN_BASE: &str = "https://cdn.sanity.io";

/// Builds width-constrained CDN URLs for one project and dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base_url: String,
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            base_url: CDN_BASE.to_string(),
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
        }
    }

    /// Resolve an asset reference to a URL, constrained to `width` pixels.
    ///
    /// Returns `None` when the reference is not an image asset reference.
    pub fn url(&self, asset_ref: &str, width: u32) -> Option<String> {
        let Some(asset) = AssetRef::parse(asset_ref) else {
            warn!(asset_ref, "unrecognised image asset reference");
            return None;
        };
        Some(format!(
            "{}/images/{}/{}/{}-{}.{}?w={}",
            self.base_url,
            self.project_id,
            self.dataset,
            asset.id,
            asset.dimensions,
            asset.format,
            width
        ))
    }
}

struct AssetRef<'a> {
    id: &'a str,
    dimensions: &'a str,
    format: &'a str,
}

impl<'a> AssetRef<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let rest = s.strip_prefix("image-")?;
        // Asset ids may not contain '-', but split from the right regardless.
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next()?;
        let dimensions = parts.next()?;
        let id = parts.next()?;

        let (w, h) = dimensions.split_once('x')?;
        let numeric = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
        if id.is_empty() || format.is_empty() || !numeric(w) || !numeric(h) {
            return None;
        }
        Some(Self {
            id,
            dimensions,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("37uuhcx4", "production")
    }

    #[test]
    fn resolves_asset_reference_with_width() {
        let url = builder()
            .url("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg", 1200)
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/37uuhcx4/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=1200"
        );
    }

    #[test]
    fn rejects_non_image_references() {
        assert!(builder().url("file-abc-pdf", 1200).is_none());
        assert!(builder().url("image-abc-widexhigh-png", 1200).is_none());
        assert!(builder().url("image--10x10-png", 1200).is_none());
        assert!(builder().url("", 1200).is_none());
    }
}
