use crate::shared::*;

/// Fill buy/sell prices. Produce and raw materials sell; seeds and the
/// heavier tools are bought.
pub fn populate_prices(registry: &mut ItemRegistry) {
    let sell: [(ItemKind, u32); 10] = [
        (ItemKind::Produce(CropKind::Parsnip), 35),
        (ItemKind::Produce(CropKind::Cauliflower), 175),
        (ItemKind::Produce(CropKind::Potato), 80),
        (ItemKind::Produce(CropKind::Tomato), 60),
        (ItemKind::Produce(CropKind::Corn), 50),
        (ItemKind::Produce(CropKind::Pumpkin), 320),
        (ItemKind::Produce(CropKind::Wheat), 25),
        (ItemKind::Wood, 2),
        (ItemKind::Stone, 2),
        (ItemKind::Fiber, 1),
    ];
    let buy: [(ItemKind, u32); 9] = [
        (ItemKind::Seed(SeedKind::Parsnip), 20),
        (ItemKind::Seed(SeedKind::Cauliflower), 80),
        (ItemKind::Seed(SeedKind::Potato), 50),
        (ItemKind::Seed(SeedKind::Tomato), 50),
        (ItemKind::Seed(SeedKind::Corn), 150),
        (ItemKind::Seed(SeedKind::Pumpkin), 100),
        (ItemKind::Seed(SeedKind::Wheat), 10),
        (ItemKind::Tool(ToolKind::Axe), 2000),
        (ItemKind::Tool(ToolKind::Pickaxe), 2000),
    ];

    for (kind, price) in sell {
        registry.prices.entry(kind).or_default().sell = price;
    }
    for (kind, price) in buy {
        registry.prices.entry(kind).or_default().buy = price;
    }
}

impl ItemRegistry {
    pub fn standard() -> Self {
        let mut registry = Self::default();
        populate_prices(&mut registry);
        registry
    }
}
