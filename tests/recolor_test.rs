// Scenario tests for band-partitioned recoloring
use gray_recolor::recolor::{
    self, pack, unpack, BandRemainder, PixelGrid, RecolorConfig, RecolorError, Rgb,
};

const UNTOUCHED: u32 = 0x1234_5678;

/// 每行交替放置灰色与非灰色像素，行号参与取值，便于逐像素比对。
fn sample_image(width: u32, height: u32) -> PixelGrid {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let base = ((x * 7 + y * 13) % 200) as u8 + 20;
                if (x + y) % 2 == 0 {
                    pack(Rgb::new(base, base.saturating_add(5), base.saturating_sub(5)))
                } else {
                    pack(Rgb::new(base, 255 - base, base / 3))
                }
            })
        })
        .collect();
    PixelGrid::from_pixels(width, height, pixels).expect("sample image")
}

fn expected_pixel(source: &PixelGrid, x: u32, y: u32) -> u32 {
    let argb = source.get(x, y).expect("pixel in bounds");
    pack(recolor::recolor_pixel(unpack(argb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_and_saturated_pixels_follow_the_scenario() {
        let source = PixelGrid::from_pixels(
            2,
            1,
            vec![pack(Rgb::new(200, 200, 200)), pack(Rgb::new(10, 200, 30))],
        )
        .expect("grid");
        let mut destination = PixelGrid::filled(2, 1, UNTOUCHED);

        recolor::recolor_parallel(&source, &mut destination, 1).expect("recolor");

        assert_eq!(unpack(destination.get(0, 0).unwrap()), Rgb::new(210, 120, 180));
        assert_eq!(unpack(destination.get(1, 0).unwrap()), Rgb::new(10, 200, 30));
        assert_eq!(destination.get(0, 0).unwrap() >> 24, 0xFF);
    }

    #[test]
    fn sequential_and_parallel_outputs_match() {
        let source = sample_image(37, 64);
        let mut sequential = PixelGrid::filled(37, 64, UNTOUCHED);
        let mut parallel = PixelGrid::filled(37, 64, UNTOUCHED);

        recolor::recolor_sequential(&source, &mut sequential).expect("sequential");
        let summary = recolor::recolor_parallel(&source, &mut parallel, 4).expect("parallel");

        assert_eq!(summary.untouched_rows, 0);
        assert_eq!(summary.pixels_written, 37 * 64);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn trailing_rows_are_left_untouched_when_height_is_not_divisible() {
        let source = sample_image(6, 10);
        let mut destination = PixelGrid::filled(6, 10, UNTOUCHED);

        let summary = recolor::recolor_parallel(&source, &mut destination, 4).expect("recolor");

        assert_eq!(summary.bands.len(), 4);
        assert!(summary.bands.iter().all(|band| band.height == 2));
        assert_eq!(summary.untouched_rows, 2);
        assert_eq!(summary.pixels_written, 6 * 8);

        for y in 0..8 {
            for x in 0..6 {
                assert_eq!(destination.get(x, y), Some(expected_pixel(&source, x, y)), "({x}, {y})");
            }
        }
        for y in 8..10 {
            assert!(destination.row(y).unwrap().iter().all(|&p| p == UNTOUCHED), "row {y}");
        }
    }

    #[test]
    fn absorbing_remainder_covers_every_row() {
        let source = sample_image(6, 10);
        let mut destination = PixelGrid::filled(6, 10, UNTOUCHED);
        let config = RecolorConfig::default()
            .with_worker_count(4)
            .with_remainder(BandRemainder::AbsorbIntoLastBand);

        let summary = recolor::recolor_with_config(&source, &mut destination, &config).expect("recolor");

        assert_eq!(summary.untouched_rows, 0);
        assert_eq!(summary.bands.last().map(|band| band.height), Some(4));

        let mut reference = PixelGrid::filled(6, 10, UNTOUCHED);
        recolor::recolor_sequential(&source, &mut reference).expect("sequential");
        assert_eq!(destination, reference);
    }

    #[test]
    fn zero_workers_fails_before_touching_destination() {
        let source = sample_image(4, 4);
        let mut destination = PixelGrid::filled(4, 4, UNTOUCHED);

        let result = recolor::recolor_parallel(&source, &mut destination, 0);

        assert!(matches!(result, Err(RecolorError::InvalidConfiguration(_))));
        assert!(destination.pixels().iter().all(|&p| p == UNTOUCHED));
    }

    #[test]
    fn more_workers_than_rows_is_a_successful_no_op() {
        let source = sample_image(5, 3);
        let mut destination = PixelGrid::filled(5, 3, UNTOUCHED);

        let summary = recolor::recolor_parallel(&source, &mut destination, 8).expect("recolor");

        assert_eq!(summary.bands.len(), 8);
        assert_eq!(summary.pixels_written, 0);
        assert_eq!(summary.untouched_rows, 3);
        assert!(destination.pixels().iter().all(|&p| p == UNTOUCHED));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let source = sample_image(4, 4);
        let mut destination = PixelGrid::filled(4, 5, UNTOUCHED);

        let result = recolor::recolor_parallel(&source, &mut destination, 2);

        assert!(matches!(
            result,
            Err(RecolorError::DimensionMismatch {
                source_height: 4,
                destination_height: 5,
                ..
            })
        ));
        assert!(destination.pixels().iter().all(|&p| p == UNTOUCHED));
    }

    #[test]
    fn region_processing_clips_to_source_bounds() {
        let source = sample_image(8, 8);
        let mut destination = PixelGrid::filled(8, 8, UNTOUCHED);

        let written = recolor::process_region_in_grid(
            &source,
            &mut destination,
            recolor::Region::new(5, 6, 10, 10),
        )
        .expect("process region");

        assert_eq!(written, 3 * 2);
        assert_eq!(destination.get(5, 6), Some(expected_pixel(&source, 5, 6)));
        assert_eq!(destination.get(7, 7), Some(expected_pixel(&source, 7, 7)));
        assert_eq!(destination.get(4, 6), Some(UNTOUCHED));
        assert_eq!(destination.get(5, 5), Some(UNTOUCHED));
    }

    #[test]
    fn region_outside_worker_band_is_reported() {
        let source = sample_image(4, 4);
        let mut destination = PixelGrid::filled(4, 4, UNTOUCHED);
        let regions = [recolor::Region::new(0, 0, 4, 2)];
        let mut bands = destination.split_bands(&regions).expect("split");

        let result = recolor::process_region(&source, &mut bands[0], recolor::Region::new(0, 2, 4, 2));

        assert!(matches!(result, Err(RecolorError::RegionOutsideBand { .. })));
    }

    #[test]
    fn worker_fault_message_names_the_band() {
        let error = RecolorError::WorkerFault {
            failed: 1,
            total: 4,
            first: recolor::BandFault {
                band: 2,
                reason: "boom".to_string(),
            },
        };

        let message = error.to_string();
        assert!(message.contains("1/4"));
        assert!(message.contains("#2"));
    }
}
