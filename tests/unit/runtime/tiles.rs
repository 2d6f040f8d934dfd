//! Tests for tile partitioning, clamping, statistics and classification

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tilebloom::runtime::{TileBounds, TileParams, TileStats, tile_stats};

    fn params(width: usize, height: usize, tile: usize) -> TileParams {
        TileParams {
            width,
            height,
            tile,
            var_threshold: 400.0,
            brightness_threshold: 9999.0,
            seed: 1,
        }
    }

    // Tests the default geometry yields a 5x4 grid
    // Verified by using floor division
    #[test]
    fn test_default_grid_dimensions() {
        let p = params(160, 120, 32);
        assert_eq!((p.tiles_x(), p.tiles_y(), p.tile_count()), (5, 4, 20));

        let last = p.tile_bounds(4, 3);
        assert_eq!((last.width(), last.height()), (32, 24));
    }

    // Tests evenly divisible frames have no clamped tiles
    // Verified by adding one to every tile end
    #[test]
    fn test_even_partition_has_full_tiles() {
        let p = params(64, 64, 16);
        let tiles: Vec<TileBounds> = p.tiles().collect();

        assert_eq!(tiles.len(), 16);
        assert!(tiles.iter().all(|t| t.width() == 16 && t.height() == 16));
    }

    // Tests the last column is clamped to the frame edge
    // Verified by removing the clamp on x1
    #[test]
    fn test_edge_column_is_clamped() {
        let p = params(65, 64, 16);
        assert_eq!(p.tiles_x(), 5);

        for ty in 0..p.tiles_y() {
            let edge = p.tile_bounds(4, ty);
            assert_eq!((edge.x0, edge.x1), (64, 65));
            assert_eq!(edge.width(), 1);
            assert_eq!(edge.height(), 16);
        }
    }

    // Tests tiles are produced row-major with matching indices
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_tiles_row_major_order() {
        let p = params(48, 32, 16);
        let order: Vec<(usize, usize, usize)> = p.tiles().map(|t| (t.index, t.tx, t.ty)).collect();

        assert_eq!(
            order,
            vec![(0, 0, 0), (1, 1, 0), (2, 2, 0), (3, 0, 1), (4, 1, 1), (5, 2, 1)]
        );
    }

    // Tests region sizes for arena carving
    // Verified by omitting anomaly bytes from the byte region
    #[test]
    fn test_region_sizes() {
        let p = params(160, 120, 32);
        assert_eq!(p.frame_len(), 19_200);
        assert_eq!(p.anomaly_bytes(), 3);
        assert_eq!(p.byte_region_len(), 19_203);
        assert_eq!(p.float_region_len(), 40);
    }

    // Tests a constant tile has mean c and zero variance
    // Verified by dividing by count - 1
    #[test]
    fn test_constant_tile_statistics() {
        let frame = Array2::<u8>::from_elem((8, 8), 77);
        let bounds = params(8, 8, 8).tile_bounds(0, 0);
        let stats = tile_stats(&frame.view(), &bounds);

        assert!((stats.mean - 77.0).abs() < f32::EPSILON);
        assert!(stats.variance.abs() < f32::EPSILON);
    }

    // Tests population variance over a known tile
    // Verified by using the sample variance
    #[test]
    fn test_population_variance() {
        // Samples 0, 2, 4, 6: mean 3, population variance 5
        let frame = Array2::from_shape_vec((2, 2), vec![0u8, 2, 4, 6]).unwrap();
        let bounds = params(2, 2, 2).tile_bounds(0, 0);
        let stats = tile_stats(&frame.view(), &bounds);

        assert!((stats.mean - 3.0).abs() < f32::EPSILON);
        assert!((stats.variance - 5.0).abs() < f32::EPSILON);
    }

    // Tests statistics only read inside the clamped tile
    // Verified by reading the full tile edge past the frame
    #[test]
    fn test_clamped_tile_statistics() {
        let mut frame = Array2::<u8>::zeros((4, 5));
        frame.column_mut(4).fill(200);

        let stats = tile_stats(&frame.view(), &params(5, 4, 4).tile_bounds(1, 0));
        assert!((stats.mean - 200.0).abs() < f32::EPSILON);
        assert!(stats.variance.abs() < f32::EPSILON);
    }

    // Tests an empty tile yields zeros instead of dividing by zero
    // Verified by removing the empty check
    #[test]
    fn test_empty_tile_yields_zero() {
        let frame = Array2::<u8>::zeros((4, 4));
        let bounds = TileBounds {
            index: 0,
            tx: 0,
            ty: 0,
            x0: 4,
            x1: 4,
            y0: 0,
            y1: 4,
        };
        assert_eq!(tile_stats(&frame.view(), &bounds), TileStats::default());
    }

    // Tests both cutoffs are strict
    // Verified by using >= comparisons
    #[test]
    fn test_strict_thresholds() {
        let p = TileParams {
            var_threshold: 100.0,
            brightness_threshold: 50.0,
            ..params(8, 8, 8)
        };

        let at_both = TileStats {
            mean: 50.0,
            variance: 100.0,
        };
        let over_variance = TileStats {
            mean: 10.0,
            variance: 100.5,
        };
        let over_mean = TileStats {
            mean: 50.5,
            variance: 0.0,
        };

        assert!(!p.is_anomalous(&at_both));
        assert!(p.is_anomalous(&over_variance));
        assert!(p.is_anomalous(&over_mean));
    }

    // Tests a constant tile is anomalous only when brightness is below c
    // Verified by dropping the brightness comparison
    #[test]
    fn test_constant_tile_brightness_classification() {
        let frame = Array2::<u8>::from_elem((4, 4), 120);
        let base = params(4, 4, 4);
        let stats = tile_stats(&frame.view(), &base.tile_bounds(0, 0));

        let dim = TileParams {
            brightness_threshold: 119.5,
            ..base
        };
        let bright = TileParams {
            brightness_threshold: 120.0,
            ..base
        };

        assert!(dim.is_anomalous(&stats));
        assert!(!bright.is_anomalous(&stats));
    }

    // Tests the combined region size counts frame, anomaly bits and both maps
    // Verified by leaving the float maps out of the total
    #[test]
    fn test_checked_region_bytes() {
        let p = params(160, 120, 32);
        assert_eq!(p.checked_region_bytes(), Some(19_203 + 40 * 4));

        let overflowing = params(usize::MAX, 2, 1);
        assert_eq!(overflowing.checked_region_bytes(), None);

        let beyond_isize = params(isize::MAX as usize, 1, isize::MAX as usize);
        assert_eq!(beyond_isize.checked_region_bytes(), None);
    }
}
