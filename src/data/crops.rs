use crate::shared::*;

/// Days to maturity per seed:
///   Parsnip 4, Cauliflower 12, Potato 6, Tomato 11, Corn 14, Pumpkin 13, Wheat 4.
/// Seeds missing from the registry grow in `DEFAULT_DAYS_TO_MATURITY` days.
pub fn populate_crops(registry: &mut CropRegistry) {
    let table: [(SeedKind, u32); 7] = [
        (SeedKind::Parsnip, 4),
        (SeedKind::Cauliflower, 12),
        (SeedKind::Potato, 6),
        (SeedKind::Tomato, 11),
        (SeedKind::Corn, 14),
        (SeedKind::Pumpkin, 13),
        (SeedKind::Wheat, 4),
    ];

    for (seed, days_to_maturity) in table {
        registry.crops.insert(
            seed,
            CropDef {
                seed,
                produce: produce_of(seed),
                days_to_maturity,
            },
        );
    }
}

/// The seed → produce table.
pub fn produce_of(seed: SeedKind) -> CropKind {
    match seed {
        SeedKind::Parsnip => CropKind::Parsnip,
        SeedKind::Cauliflower => CropKind::Cauliflower,
        SeedKind::Potato => CropKind::Potato,
        SeedKind::Tomato => CropKind::Tomato,
        SeedKind::Corn => CropKind::Corn,
        SeedKind::Pumpkin => CropKind::Pumpkin,
        SeedKind::Wheat => CropKind::Wheat,
    }
}

impl CropRegistry {
    /// A registry holding the standard table, for callers that don't run
    /// the data plugin.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        populate_crops(&mut registry);
        registry
    }

    pub fn days_to_maturity(&self, seed: SeedKind) -> u32 {
        self.crops
            .get(&seed)
            .map(|def| def.days_to_maturity)
            .unwrap_or(DEFAULT_DAYS_TO_MATURITY)
    }

    pub fn produce(&self, seed: SeedKind) -> CropKind {
        self.crops
            .get(&seed)
            .map(|def| def.produce)
            .unwrap_or_else(|| produce_of(seed))
    }
}
