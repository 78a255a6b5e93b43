//! Production placeholders use the generic manager strategies as-is.

use super::kepler::{
    KeplerCreateStrategy, KeplerDeleteStrategy, KeplerGetByIdStrategy, KeplerUpdateStrategy,
    ObjectQueryGetByNameStrategy,
};
use rtf_model::ProductionPlaceholder;

pub type ProductionPlaceholderGetByIdStrategy = KeplerGetByIdStrategy<ProductionPlaceholder>;
pub type ProductionPlaceholderGetByNameStrategy = ObjectQueryGetByNameStrategy<ProductionPlaceholder>;
pub type ProductionPlaceholderCreateStrategy = KeplerCreateStrategy<ProductionPlaceholder>;
pub type ProductionPlaceholderUpdateStrategy = KeplerUpdateStrategy<ProductionPlaceholder>;
pub type ProductionPlaceholderDeleteStrategy = KeplerDeleteStrategy<ProductionPlaceholder>;
