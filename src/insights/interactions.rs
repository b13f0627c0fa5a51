use serde::Serialize;

use super::InsightType;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Inhibits,
    Enhances,
    Caution,
}

impl InteractionKind {
    pub fn insight_type(self) -> InsightType {
        match self {
            InteractionKind::Inhibits | InteractionKind::Caution => InsightType::Warning,
            InteractionKind::Enhances => InsightType::Info,
        }
    }

    pub fn message(self, first: &str, second: &str) -> String {
        match self {
            InteractionKind::Inhibits => format!("{} and {} may interact", first, second),
            InteractionKind::Caution => format!("Caution: {} and {}", first, second),
            InteractionKind::Enhances => format!("{} enhances {}", first, second),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct InteractionRule {
    pub nutrients: [&'static str; 2],
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub description: &'static str,
}

const fn rule(
    first: &'static str,
    second: &'static str,
    kind: InteractionKind,
    description: &'static str,
) -> InteractionRule {
    InteractionRule {
        nutrients: [first, second],
        kind,
        description,
    }
}

pub const INTERACTION_RULES: &[InteractionRule] = &[
    rule(
        "Calcium",
        "Iron",
        InteractionKind::Inhibits,
        "Calcium can reduce iron absorption. Consider taking them at least 2 hours apart.",
    ),
    rule(
        "Zinc",
        "Copper",
        InteractionKind::Inhibits,
        "High zinc intake can interfere with copper absorption over time.",
    ),
    rule(
        "Iron",
        "Zinc",
        InteractionKind::Inhibits,
        "Iron and zinc compete for absorption when taken together in supplement doses.",
    ),
    rule(
        "Calcium",
        "Zinc",
        InteractionKind::Inhibits,
        "Large calcium doses can lower zinc absorption from the same meal.",
    ),
    rule(
        "Calcium",
        "Magnesium",
        InteractionKind::Inhibits,
        "Calcium and magnesium share absorption pathways; very high calcium can crowd out magnesium.",
    ),
    rule(
        "Vitamin C",
        "Iron",
        InteractionKind::Enhances,
        "Vitamin C improves absorption of non-heme iron.",
    ),
    rule(
        "Vitamin D",
        "Calcium",
        InteractionKind::Enhances,
        "Vitamin D is needed for efficient calcium absorption.",
    ),
    rule(
        "Magnesium",
        "Vitamin D",
        InteractionKind::Enhances,
        "Magnesium is required to convert vitamin D into its active form.",
    ),
    rule(
        "Vitamin E",
        "Vitamin K",
        InteractionKind::Caution,
        "High doses of vitamin E may interfere with vitamin K's role in blood clotting.",
    ),
    rule(
        "Folic Acid",
        "Vitamin B12",
        InteractionKind::Caution,
        "High folic acid intake can mask the signs of a vitamin B12 deficiency.",
    ),
];

/// Every rule whose two nutrients both appear in `names`, in table order.
pub fn check_interactions<S: AsRef<str>>(names: &[S]) -> Vec<&'static InteractionRule> {
    let present = |nutrient: &str| names.iter().any(|name| name.as_ref() == nutrient);
    INTERACTION_RULES
        .iter()
        .filter(|rule| present(rule.nutrients[0]) && present(rule.nutrients[1]))
        .collect()
}
