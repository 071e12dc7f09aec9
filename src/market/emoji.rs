//! Crop name to emoji lookup

const DEFAULT_EMOJI: &str = "🌱";

/// Searched in order for partial matches
const CROP_EMOJIS: &[(&str, &str)] = &[
    // vegetables
    ("tomato", "🍅"),
    ("potato", "🥔"),
    ("onion", "🧅"),
    ("carrot", "🥕"),
    ("cabbage", "🥬"),
    ("cauliflower", "🥦"),
    ("broccoli", "🥦"),
    ("capsicum", "🫑"),
    ("bell pepper", "🫑"),
    ("chilli", "🌶️"),
    ("green chilli", "🌶️"),
    ("red chilli", "🌶️"),
    ("garlic", "🧄"),
    ("ginger", "🫚"),
    ("beetroot", "🍠"),
    ("sweet potato", "🍠"),
    ("pumpkin", "🎃"),
    ("cucumber", "🥒"),
    ("bitter gourd", "🥒"),
    ("bottle gourd", "🥒"),
    ("ridge gourd", "🥒"),
    ("okra", "🌶️"),
    ("ladyfinger", "🌶️"),
    ("eggplant", "🍆"),
    ("brinjal", "🍆"),
    ("spinach", "🥬"),
    ("lettuce", "🥬"),
    ("coriander", "🌿"),
    ("mint", "🌿"),
    ("fenugreek", "🌿"),
    // fruits
    ("apple", "🍎"),
    ("banana", "🍌"),
    ("orange", "🍊"),
    ("mango", "🥭"),
    ("grapes", "🍇"),
    ("papaya", "🥭"),
    ("pineapple", "🍍"),
    ("pomegranate", "🫐"),
    ("watermelon", "🍉"),
    ("muskmelon", "🍈"),
    ("lemon", "🍋"),
    ("lime", "🍋"),
    ("coconut", "🥥"),
    ("guava", "🥭"),
    ("strawberry", "🍓"),
    ("cherry", "🍒"),
    ("peach", "🍑"),
    ("pear", "🍐"),
    ("kiwi", "🥝"),
    ("avocado", "🥑"),
    // cereals
    ("rice", "🍚"),
    ("wheat", "🌾"),
    ("barley", "🌾"),
    ("corn", "🌽"),
    ("maize", "🌽"),
    ("bajra", "🌾"),
    ("jowar", "🌾"),
    ("ragi", "🌾"),
    ("oats", "🌾"),
    ("quinoa", "🌾"),
    // pulses
    ("moong", "🫘"),
    ("chana", "🫘"),
    ("toor", "🫘"),
    ("urad", "🫘"),
    ("masur", "🫘"),
    ("kidney beans", "🫘"),
    ("black gram", "🫘"),
    ("green gram", "🫘"),
    ("chickpea", "🫘"),
    ("lentil", "🫘"),
    ("pigeon pea", "🫘"),
    ("soybean", "🫘"),
    ("groundnut", "🥜"),
    ("peanut", "🥜"),
    // spices
    ("turmeric", "🟡"),
    ("cumin", "🟤"),
    ("coriander seed", "🟤"),
    ("black pepper", "⚫"),
    ("cardamom", "🟤"),
    ("cinnamon", "🟤"),
    ("cloves", "🟤"),
    ("nutmeg", "🟤"),
    ("red chilli powder", "🌶️"),
    // cash crops
    ("cotton", "🌾"),
    ("sugarcane", "🌾"),
    ("tea", "🍃"),
    ("coffee", "☕"),
    ("rubber", "🌿"),
    ("jute", "🌾"),
    ("tobacco", "🌿"),
    // oil seeds
    ("mustard", "🌻"),
    ("sunflower", "🌻"),
    ("sesame", "🌰"),
    ("safflower", "🌻"),
    ("castor", "🌰"),
    ("coconut oil", "🥥"),
    ("palm oil", "🌴"),
    // flowers
    ("rose", "🌹"),
    ("jasmine", "🌸"),
    ("marigold", "🌼"),
    ("chrysanthemum", "🌼"),
    ("lotus", "🪷"),
    // dairy and poultry
    ("milk", "🥛"),
    ("egg", "🥚"),
    ("chicken", "🐔"),
    ("mutton", "🐑"),
    ("fish", "🐟"),
    // others
    ("jaggery", "🟤"),
    ("honey", "🍯"),
    ("dates", "🫐"),
    ("dry fruits", "🌰"),
    ("almonds", "🌰"),
    ("cashew", "🌰"),
    ("walnut", "🌰"),
    ("raisins", "🍇"),
];

/// Exact name first, then the first entry that contains or is contained in
/// the name, then a seedling.
pub fn crop_emoji(crop_name: &str) -> &'static str {
    let name = crop_name.trim().to_lowercase();
    if name.is_empty() {
        return DEFAULT_EMOJI;
    }

    if let Some((_, emoji)) = CROP_EMOJIS.iter().find(|(key, _)| *key == name) {
        return *emoji;
    }

    CROP_EMOJIS
        .iter()
        .find(|(key, _)| name.contains(key) || key.contains(name.as_str()))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// "🌾 Wheat"
pub fn formatted_crop_name(crop_name: &str) -> String {
    format!("{} {}", crop_emoji(crop_name), crop_name)
}

pub fn has_specific_emoji(crop_name: &str) -> bool {
    crop_emoji(crop_name) != DEFAULT_EMOJI
}
