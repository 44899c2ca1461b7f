//! Fixed report geometry. The SVG and HTML renderers both draw against this
//! layout, so card positions only ever change here.

pub const REPORT_WIDTH: i32 = 1400;
pub const REPORT_HEIGHT: i32 = 1220;

pub const MARGIN: i32 = 24;
pub const GAP: i32 = 16;
pub const CARD_RADIUS: i32 = 14;

pub const TOP_HEIGHT: i32 = 360;
pub const STAT_HEIGHT: i32 = 58;
pub const KPI_HEIGHT: i32 = 140;
pub const MID_HEIGHT: i32 = 300;
pub const CHART_HEIGHT: i32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SectionRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub top_left: SectionRect,
    pub top_right: SectionRect,
    pub stat_cards: [SectionRect; 3],
    pub kpi_cards: [SectionRect; 3],
    pub mid_left: SectionRect,
    pub mid_right: SectionRect,
    pub chart_left: SectionRect,
    pub chart_right: SectionRect,
}

impl ReportLayout {
    pub fn all_rects(&self) -> Vec<SectionRect> {
        let mut rects = vec![self.top_left, self.top_right];
        rects.extend(self.stat_cards);
        rects.extend(self.kpi_cards);
        rects.extend([self.mid_left, self.mid_right, self.chart_left, self.chart_right]);
        rects
    }
}

pub fn build_report_layout() -> ReportLayout {
    let top_y = MARGIN;
    let stat_y = top_y + TOP_HEIGHT + GAP;
    let kpi_y = stat_y + STAT_HEIGHT + GAP;
    let mid_y = kpi_y + KPI_HEIGHT + GAP;
    let chart_y = mid_y + MID_HEIGHT + GAP;

    ReportLayout {
        top_left: SectionRect::new(MARGIN, top_y, 804, TOP_HEIGHT),
        top_right: SectionRect::new(844, top_y, 532, TOP_HEIGHT),
        stat_cards: [
            SectionRect::new(24, stat_y, 440, STAT_HEIGHT),
            SectionRect::new(480, stat_y, 440, STAT_HEIGHT),
            SectionRect::new(936, stat_y, 440, STAT_HEIGHT),
        ],
        kpi_cards: [
            SectionRect::new(24, kpi_y, 440, KPI_HEIGHT),
            SectionRect::new(480, kpi_y, 440, KPI_HEIGHT),
            SectionRect::new(936, kpi_y, 440, KPI_HEIGHT),
        ],
        mid_left: SectionRect::new(24, mid_y, 580, MID_HEIGHT),
        mid_right: SectionRect::new(620, mid_y, 756, MID_HEIGHT),
        chart_left: SectionRect::new(24, chart_y, 668, CHART_HEIGHT),
        chart_right: SectionRect::new(708, chart_y, 668, CHART_HEIGHT),
    }
}

/// Plot area shared by the monthly and weekday bar charts.
#[derive(Debug, Clone, Copy)]
pub struct ChartGeometry {
    pub header_y: i32,
    pub plot_x: i32,
    pub plot_top: i32,
    pub plot_w: i32,
    pub plot_h: i32,
    pub plot_bottom: i32,
    pub axis_y: i32,
}

pub fn chart_geometry(card: SectionRect) -> ChartGeometry {
    let plot_top = card.y + 68;
    let plot_h = 140;

    ChartGeometry {
        header_y: card.y + 34,
        plot_x: card.x + 24,
        plot_top,
        plot_w: card.w - 48,
        plot_h,
        plot_bottom: plot_top + plot_h,
        axis_y: card.bottom() - 16,
    }
}

pub fn rects_overlap(a: SectionRect, b: SectionRect, spacing: i32) -> bool {
    if a.right() + spacing <= b.x || b.right() + spacing <= a.x {
        return false;
    }
    if a.bottom() + spacing <= b.y || b.bottom() + spacing <= a.y {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_card_overlaps() {
        let rects = build_report_layout().all_rects();

        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!rects_overlap(*a, *b, 0), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_all_cards_inside_canvas() {
        for rect in build_report_layout().all_rects() {
            assert!(rect.x >= 0 && rect.y >= 0);
            assert!(rect.right() <= REPORT_WIDTH, "{rect:?} spills right");
            assert!(rect.bottom() <= REPORT_HEIGHT, "{rect:?} spills bottom");
        }
    }

    #[test]
    fn test_chart_geometry_fits_card() {
        let layout = build_report_layout();

        for card in [layout.chart_left, layout.chart_right] {
            let g = chart_geometry(card);
            assert!(g.plot_x >= card.x);
            assert!(g.plot_x + g.plot_w <= card.right());
            assert!(g.plot_bottom < g.axis_y);
            assert!(g.axis_y <= card.bottom());
        }
    }

    #[test]
    fn test_rects_overlap_detects_touching_with_spacing() {
        let a = SectionRect::new(0, 0, 10, 10);
        let b = SectionRect::new(10, 0, 10, 10);
        assert!(!rects_overlap(a, b, 0));
        assert!(rects_overlap(a, b, 1));
    }
}
