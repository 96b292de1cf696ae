use crate::models::{ContentCategory, Platform};

/// Share of the business's product categories the influencer covers (0-1)
///
/// Each business label is compared by exact, case-sensitive equality against
/// the influencer's recognized content categories. Duplicate business labels
/// count once per occurrence.
#[inline]
pub fn category_match(
    business_categories: &[String],
    influencer_categories: &[ContentCategory],
) -> f64 {
    let matching = business_categories
        .iter()
        .filter(|label| {
            influencer_categories
                .iter()
                .any(|category| category.is_recognized() && category.as_str() == label.as_str())
        })
        .count();

    matching as f64 / business_categories.len().max(1) as f64
}

/// Share of the business's platforms the influencer is also active on (0-1)
#[inline]
pub fn platform_match<'a, I>(business_platforms: I, influencer_platforms: &[Platform]) -> f64
where
    I: IntoIterator<Item = &'a Platform>,
{
    let mut listed = 0usize;
    let mut matching = 0usize;

    for platform in business_platforms {
        listed += 1;
        if platform.is_recognized() && influencer_platforms.contains(platform) {
            matching += 1;
        }
    }

    matching as f64 / listed.max(1) as f64
}
