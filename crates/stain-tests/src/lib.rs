//! End-to-end tests for the stain normalization crates.
//!
//! These exercise the full path a tile takes on disk: decode, normalize,
//! encode, decode again.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rayon::prelude::*;
    use stain_core::ImageData;
    use stain_norm::{ChannelStats, StainNormalization, Subfunction, apply_chain};
    use tempfile::tempdir;

    /// Pink/purple tissue texture on a pale background.
    fn tissue(width: u32, height: u32, seed: u32) -> ImageData {
        let palette: [[u8; 3]; 4] = [
            [180, 90, 160],
            [240, 220, 235],
            [230, 180, 210],
            [200, 120, 180],
        ];
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let i = (x * 7 + y * 13 + seed) % 4;
                data.extend_from_slice(&palette[i as usize]);
            }
        }
        ImageData::from_u8(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_file_pipeline_lossless_formats() {
        let dir = tempdir().unwrap();
        let reference_path = dir.path().join("reference.png");
        stain_io::write(&reference_path, &tissue(32, 32, 0)).unwrap();

        let normalizer = StainNormalization::from_path(&reference_path).expect("reference");
        let tile = tissue(24, 16, 3);
        let expected = normalizer.transform(&tile).unwrap();

        for ext in ["png", "tiff", "bmp"] {
            let input = dir.path().join(format!("tile.{}", ext));
            let output = dir.path().join(format!("tile_norm.{}", ext));
            stain_io::write(&input, &tile).unwrap();

            let loaded = stain_io::read(&input).unwrap();
            let normalized = normalizer.transform(&loaded).unwrap();
            stain_io::write(&output, &normalized).unwrap();

            assert_eq!(stain_io::read(&output).unwrap(), expected, "{}", ext);
        }
    }

    #[test]
    fn test_lossy_reference_still_constructs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reference.jpg");
        stain_io::write(&path, &tissue(32, 32, 1)).unwrap();

        let normalizer = StainNormalization::from_path(&path).unwrap();
        let stats = normalizer.reference_stats();
        assert!(stats.is_valid());
        assert!(stats.std.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_persisted_statistics_match_image_reference() {
        let dir = tempdir().unwrap();
        let reference = tissue(16, 16, 2);
        let from_image = StainNormalization::new(&reference).unwrap();

        let json = dir.path().join("reference.json");
        from_image.reference_stats().save(&json).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(parsed["mean"].as_array().map(|a| a.len()), Some(3));

        let from_file = StainNormalization::from_stats(ChannelStats::load(&json).unwrap()).unwrap();
        let tile = tissue(20, 20, 1);
        assert_eq!(
            from_file.transform(&tile).unwrap(),
            from_image.transform(&tile).unwrap()
        );
    }

    #[test]
    fn test_parallel_tiles_share_one_normalizer() {
        let step: Arc<dyn Subfunction> =
            Arc::new(StainNormalization::new(&tissue(32, 32, 0)).unwrap());
        let tiles: Vec<ImageData> = (0..16).map(|seed| tissue(16, 12, seed)).collect();

        let sequential: Vec<ImageData> =
            tiles.iter().map(|t| step.transform(t).unwrap()).collect();
        let parallel: Vec<ImageData> = tiles
            .par_iter()
            .map(|t| step.transform(t).unwrap())
            .collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_chain_of_normalizers() {
        let first = StainNormalization::new(&tissue(16, 16, 1)).unwrap();
        let second = StainNormalization::new(&tissue(16, 16, 3)).unwrap();
        let tile = tissue(10, 10, 2);

        let chained = apply_chain(&[&first, &second], &tile).unwrap();
        assert_eq!(chained.shape(), tile.shape());
        assert_eq!(
            chained,
            second.transform(&first.transform(&tile).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_normalized_tile_is_near_fixed_point() {
        let normalizer = StainNormalization::new(&tissue(32, 32, 0)).unwrap();
        let once = normalizer.transform(&tissue(24, 24, 1)).unwrap();
        let twice = normalizer.transform(&once).unwrap();

        let max_diff = once
            .as_u8()
            .unwrap()
            .iter()
            .zip(twice.as_u8().unwrap())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0);
        assert!(max_diff <= 3, "max diff {}", max_diff);
    }
}
