pub mod html;
pub mod layout;
pub mod svg;

pub use html::render_report_html;
pub use svg::render_yearly_report_svg;

use crate::models::ContributionLevel;

/// GitHub's heatmap palette, shared by the SVG and HTML renderers.
pub(crate) fn level_color(level: ContributionLevel) -> &'static str {
    match level {
        ContributionLevel::None => "#E6EDF3",
        ContributionLevel::FirstQuartile => "#9BE9A8",
        ContributionLevel::SecondQuartile => "#40C463",
        ContributionLevel::ThirdQuartile => "#30A14E",
        ContributionLevel::FourthQuartile => "#216E39",
    }
}
