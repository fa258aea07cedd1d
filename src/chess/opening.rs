/// Opening name split into `Family[: Variation[, SubVariation]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningTaxonomy {
    pub family: Option<String>,
    pub variation: Option<String>,
    pub sub_variation: Option<String>,
}

fn non_empty(segment: &str) -> Option<String> {
    let s = segment.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Splits on the first ':' and then on the first ',' of the variation part.
/// Anything after that comma stays in the sub-variation.
pub fn split_opening(opening: Option<&str>) -> OpeningTaxonomy {
    let Some(opening) = opening else {
        return OpeningTaxonomy::default();
    };

    let (family, rest) = match opening.split_once(':') {
        Some((family, rest)) => (family, Some(rest)),
        None => (opening, None),
    };

    let (variation, sub_variation) = match rest.map(|r| r.split_once(',').unwrap_or((r, ""))) {
        Some((variation, sub)) => (non_empty(variation), non_empty(sub)),
        None => (None, None),
    };

    OpeningTaxonomy {
        family: non_empty(family),
        variation,
        sub_variation,
    }
}
