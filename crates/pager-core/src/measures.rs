use score_engine::RenderedScore;
use serde::Serialize;

/// Inclusive measure-number span covered by one system (or one page).
///
/// Measure numbers are content-layer identifiers assigned by the engine and
/// must never be conflated with system indices, which are presentation-layer
/// ordinals over the measured bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeasureSpan {
    pub first: u32,
    pub last: u32,
}

/// Map each system index to the measure-number span it draws.
///
/// A system with no measure children (a decorative or empty group the
/// engine kept in the tree) carries the running number forward so the spans
/// stay monotonically non-decreasing.
pub fn system_measure_spans(score: &RenderedScore) -> Vec<MeasureSpan> {
    let mut spans = Vec::with_capacity(score.system_count());
    let mut carried = 0u32;

    for system in score.systems() {
        let mut first = None;
        let mut last = carried;

        for number in system.measure_numbers() {
            if first.is_none() {
                first = Some(number);
            }
            last = last.max(number);
        }

        let first = first.unwrap_or(carried);
        carried = last;
        spans.push(MeasureSpan { first, last });
    }

    spans
}

/// Measure span covered by the page `[start, end]`, if those systems exist.
pub fn page_measure_span(spans: &[MeasureSpan], start: usize, end: usize) -> Option<MeasureSpan> {
    let first = spans.get(start)?.first;
    let last = spans.get(end)?.last;

    Some(MeasureSpan { first, last })
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_engine::{FixtureEngine, FixtureScore, FixtureSystem, ScoreEngine, ScoreSource};

    fn rendered_score(measures_per_system: &[u32]) -> RenderedScore {
        let fixture = FixtureScore {
            page_width: 900.0,
            top_margin: 24.0,
            system_gap: 36.0,
            side_margin: 40.0,
            settle_frames: 0,
            systems: measures_per_system
                .iter()
                .map(|count| FixtureSystem {
                    height: 100.0,
                    staves: 1,
                    measures: *count,
                    gap_before: None,
                })
                .collect(),
        };

        let mut engine = FixtureEngine::new();
        engine
            .load(ScoreSource::Bytes(serde_json::to_vec(&fixture).expect("serialize")))
            .expect("load should succeed");
        engine.render().expect("render should succeed");
        engine.rendered().expect("rendered tree expected").clone()
    }

    #[test]
    fn spans_follow_engine_measure_numbering() {
        let spans = system_measure_spans(&rendered_score(&[4, 3, 5]));

        assert_eq!(
            spans,
            vec![
                MeasureSpan { first: 1, last: 4 },
                MeasureSpan { first: 5, last: 7 },
                MeasureSpan { first: 8, last: 12 },
            ]
        );
    }

    #[test]
    fn spans_are_monotonically_non_decreasing() {
        let spans = system_measure_spans(&rendered_score(&[2, 6, 1, 3]));

        for pair in spans.windows(2) {
            assert!(pair[1].first >= pair[0].last);
        }
    }

    #[test]
    fn page_span_unions_its_systems() {
        let spans = system_measure_spans(&rendered_score(&[4, 3, 5]));

        assert_eq!(page_measure_span(&spans, 0, 1), Some(MeasureSpan { first: 1, last: 7 }));
        assert_eq!(page_measure_span(&spans, 2, 2), Some(MeasureSpan { first: 8, last: 12 }));
        assert_eq!(page_measure_span(&spans, 0, 9), None);
    }
}
