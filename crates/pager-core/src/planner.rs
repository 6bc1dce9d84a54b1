use crate::Band;

/// How many consecutive systems starting at `start` fit in the viewport.
///
/// Walks bands in order, accumulating until the next band's bottom, offset
/// from the page's first band top, would cross `available_height -
/// safety_padding`. Never returns less than 1: a single system taller than
/// the viewport still receives a dedicated page rather than being skipped.
pub fn lines_that_fit(
    bands: &[Band],
    start: usize,
    available_height: f32,
    safety_padding: f32,
) -> usize {
    let Some(first) = bands.get(start) else {
        return 1;
    };

    let limit = available_height - safety_padding;
    let mut count = 1;

    for band in &bands[start + 1..] {
        if band.bottom - first.top > limit {
            break;
        }
        count += 1;
    }

    count
}

/// Largest start index from which a full-or-final page begins.
pub fn last_valid_start(total: usize, lines_per_page: usize) -> usize {
    total.saturating_sub(lines_per_page.max(1))
}

/// Clamp a start index into `[0, last_valid_start]`.
pub fn clamp_start(start: usize, total: usize, lines_per_page: usize) -> usize {
    start.min(last_valid_start(total, lines_per_page))
}

/// Inclusive index of the last system on the page starting at `start`.
pub fn page_end(start: usize, lines_per_page: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }

    (start + lines_per_page.max(1) - 1).min(total - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands_with_heights(heights: &[f32], gap: f32) -> Vec<Band> {
        let mut bands = Vec::new();
        let mut top = 0.0;

        for height in heights {
            bands.push(Band::new(top, top + height));
            top += height + gap;
        }

        bands
    }

    #[test]
    fn accumulates_until_padding_limit_is_crossed() {
        // Heights [100,120,90,110,95], no inter-band gap: at viewport 300
        // with 20 padding the limit is 280. [100,120] = 220 fits; adding the
        // third reaches 310 and overflows.
        let bands = bands_with_heights(&[100.0, 120.0, 90.0, 110.0, 95.0], 0.0);

        assert_eq!(lines_that_fit(&bands, 0, 300.0, 20.0), 2);
    }

    #[test]
    fn second_page_starts_where_the_first_stopped() {
        let bands = bands_with_heights(&[100.0, 120.0, 90.0, 110.0, 95.0], 0.0);
        let lines = lines_that_fit(&bands, 0, 300.0, 20.0);

        assert_eq!(page_end(0, lines, bands.len()), 1);
        assert_eq!(page_end(0, lines, bands.len()) + 1, 2);
    }

    #[test]
    fn inter_band_gaps_count_against_the_fit_limit() {
        let tight = bands_with_heights(&[100.0, 100.0], 0.0);
        let loose = bands_with_heights(&[100.0, 100.0], 150.0);

        assert_eq!(lines_that_fit(&tight, 0, 300.0, 20.0), 2);
        assert_eq!(lines_that_fit(&loose, 0, 300.0, 20.0), 1);
    }

    #[test]
    fn single_oversized_system_still_gets_a_page() {
        let bands = bands_with_heights(&[800.0, 100.0], 0.0);

        assert_eq!(lines_that_fit(&bands, 0, 300.0, 20.0), 1);
        assert_eq!(lines_that_fit(&bands, 1, 300.0, 20.0), 1);
    }

    #[test]
    fn fit_is_relative_to_the_requested_start() {
        let bands = bands_with_heights(&[100.0, 120.0, 90.0, 110.0, 95.0], 0.0);

        // From index 2: [90,110] = 200 fits, adding 95 reaches 295 > 280.
        assert_eq!(lines_that_fit(&bands, 2, 300.0, 20.0), 2);
    }

    #[test]
    fn start_past_the_last_band_floors_at_one() {
        let bands = bands_with_heights(&[100.0], 0.0);

        assert_eq!(lines_that_fit(&bands, 5, 300.0, 20.0), 1);
        assert_eq!(lines_that_fit(&[], 0, 300.0, 20.0), 1);
    }

    #[test]
    fn clamping_respects_last_valid_start() {
        assert_eq!(last_valid_start(5, 2), 3);
        assert_eq!(clamp_start(4, 5, 2), 3);
        assert_eq!(clamp_start(2, 5, 2), 2);
        assert_eq!(clamp_start(usize::MAX, 5, 2), 3);
    }

    #[test]
    fn clamping_handles_short_and_empty_scores() {
        // Fewer systems than fit on one page.
        assert_eq!(last_valid_start(3, 4), 0);
        assert_eq!(clamp_start(2, 3, 4), 0);
        assert_eq!(clamp_start(0, 0, 1), 0);
    }

    #[test]
    fn page_sweep_covers_every_index() {
        let bands = bands_with_heights(&[100.0, 120.0, 90.0, 110.0, 95.0], 0.0);
        let total = bands.len();
        let lines = lines_that_fit(&bands, 0, 300.0, 20.0);

        let mut covered = vec![false; total];
        let mut start = 0;
        loop {
            for index in start..=page_end(start, lines, total) {
                covered[index] = true;
            }
            if start >= last_valid_start(total, lines) {
                break;
            }
            start = (start + lines).min(last_valid_start(total, lines));
        }

        assert!(covered.into_iter().all(|seen| seen));
    }

    #[test]
    fn page_end_never_passes_the_last_system() {
        assert_eq!(page_end(3, 4, 5), 4);
        assert_eq!(page_end(0, 2, 5), 1);
        assert_eq!(page_end(0, 1, 0), 0);
    }
}
