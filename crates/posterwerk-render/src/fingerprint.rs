// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render fingerprint — a SHA-256 key over everything that determines the
// output raster, for callers that memoise renders.

use posterwerk_core::config::RenderConfig;
use posterwerk_core::error::Result;
use posterwerk_core::{AssetKind, RenderRequest};
use sha2::{Digest, Sha256};

use crate::assets::PosterAssets;

/// SHA-256 of `data` as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Key for one render: request, configuration and the bytes of every
/// supplied asset. Two calls with equal keys produce identical canvases.
pub fn render_key(
    request: &RenderRequest,
    config: &RenderConfig,
    assets: &PosterAssets,
) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(request)?);
    hasher.update(serde_json::to_vec(config)?);

    for kind in [AssetKind::Texture, AssetKind::Photo, AssetKind::Logo] {
        update_asset(&mut hasher, kind, assets.image(kind).map(|source| source.identity_bytes()));
    }
    update_asset(&mut hasher, AssetKind::Font, assets.font.as_deref());

    Ok(hex::encode(hasher.finalize()))
}

// Length-prefixed so adjacent assets cannot alias each other.
fn update_asset(hasher: &mut Sha256, kind: AssetKind, bytes: Option<&[u8]>) {
    hasher.update(kind.to_string().as_bytes());
    match bytes {
        Some(bytes) => {
            hasher.update([1u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        None => hasher.update([0u8]),
    }
}
