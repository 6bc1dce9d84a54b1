use serde::Serialize;

/// Status readout for the host UI. Pure function of planner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub page: usize,
    pub page_count: usize,
    pub lines_per_page: usize,
    pub total_systems: usize,
}

pub fn derive_status(start_index: usize, lines_per_page: usize, total_systems: usize) -> PageStatus {
    let lines_per_page = lines_per_page.max(1);
    let page_count = total_systems.div_ceil(lines_per_page).max(1);
    let page = (start_index / lines_per_page + 1).min(page_count);

    PageStatus { page, page_count, lines_per_page, total_systems }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_are_one_based() {
        assert_eq!(derive_status(0, 2, 5).page, 1);
        assert_eq!(derive_status(2, 2, 5).page, 2);
        assert_eq!(derive_status(4, 2, 5).page, 3);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(derive_status(0, 2, 5).page_count, 3);
        assert_eq!(derive_status(0, 3, 6).page_count, 2);
    }

    #[test]
    fn empty_score_still_reports_one_page() {
        let status = derive_status(0, 1, 0);

        assert_eq!(status.page, 1);
        assert_eq!(status.page_count, 1);
    }

    #[test]
    fn page_is_clamped_to_the_count() {
        // A stale start index past the end maps to the last page.
        let status = derive_status(9, 2, 5);

        assert_eq!(status.page, 3);
    }
}
