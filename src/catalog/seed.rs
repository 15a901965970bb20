use crate::domain::Product;

const UNSPLASH_PARAMS: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80";

#[allow(clippy::too_many_arguments)]
fn item(
    id: u64,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    photo: &str,
    stock: u32,
    featured: bool,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: format!("https://images.unsplash.com/{photo}{UNSPLASH_PARAMS}"),
        stock,
        featured,
    }
}

/// The starter catalog written to storage on first run.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        item(
            1,
            "Emerald Velvet Cushion",
            "Luxurious emerald velvet cushion with gold embroidered details. Perfect statement piece for modern living spaces.",
            89.99,
            "Textiles",
            "photo-1586023492125-27b2c045efd7",
            15,
            true,
        ),
        item(
            2,
            "Minimalist Ceramic Vase",
            "Handcrafted ceramic vase with matte finish in slate gray. Perfect for fresh flowers or as decorative centerpiece.",
            65.00,
            "Decor",
            "photo-1578662996442-48f60103fc96",
            8,
            true,
        ),
        item(
            3,
            "Marble Coasters Set",
            "Set of 4 natural marble coasters with cork backing. Each piece unique with beautiful natural veining.",
            45.99,
            "Kitchen",
            "photo-1571844307880-751c6d86f3f3",
            20,
            false,
        ),
        item(
            4,
            "Brass Floor Lamp",
            "Elegant brass floor lamp with adjustable height. Creates warm ambient lighting for any room.",
            299.99,
            "Lighting",
            "photo-1507003211169-0a1dd7228f2d",
            5,
            true,
        ),
        item(
            5,
            "Organic Cotton Throw",
            "Soft organic cotton throw blanket in sage green. Perfect for cozy evenings and meditation spaces.",
            125.00,
            "Textiles",
            "photo-1555041469-a586c61ea9bc",
            12,
            true,
        ),
        item(
            6,
            "Wooden Serving Board",
            "Handcrafted acacia wood serving board with natural oil finish. Ideal for entertaining and charcuterie.",
            78.50,
            "Kitchen",
            "photo-1603189838371-d57dc0530ab0",
            18,
            false,
        ),
        item(
            7,
            "Glass Pendant Light",
            "Modern glass pendant light with adjustable cord. Adds contemporary elegance to any space.",
            189.99,
            "Lighting",
            "photo-1540932239986-30128078f3c5",
            7,
            true,
        ),
        item(
            8,
            "Leather Bookmark",
            "Premium leather bookmark with brass detailing. A sophisticated gift for book lovers.",
            24.99,
            "Accessories",
            "photo-1544716278-ca5e3f4abd8c",
            25,
            false,
        ),
        item(
            9,
            "Succulent Plant Collection",
            "Collection of 3 rare succulent plants in designer ceramic pots. Low maintenance and beautiful.",
            95.00,
            "Plants",
            "photo-1416879595882-3373a0480b5b",
            10,
            true,
        ),
        item(
            10,
            "Copper Watering Can",
            "Hand-hammered copper watering can with ergonomic design. Beautiful and functional for plant care.",
            82.99,
            "Garden",
            "photo-1416879595882-3373a0480b5b",
            6,
            false,
        ),
    ]
}
