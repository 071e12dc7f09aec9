//! Keyword replies used when no completion API is configured

struct Topic {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["pest", "insect", "bug"],
        reply: "For pest management, I recommend integrated pest management (IPM) practices. First, identify the specific pest affecting your crop. Common solutions include neem oil spray, beneficial insects, or targeted pesticides as a last resort. Would you like specific advice for a particular pest?",
    },
    Topic {
        keywords: &["fertilizer", "nutrient"],
        reply: "For optimal fertilizer application, conduct a soil test first. Generally, NPK fertilizers work well for most crops. Organic options like compost and vermicompost are excellent for soil health. Apply fertilizers based on your crop's growth stage and soil requirements.",
    },
    Topic {
        keywords: &["disease", "fungus", "infection"],
        reply: "Plant diseases often require quick action. Remove affected plant parts immediately and dispose properly. Copper-based fungicides or neem oil can help with fungal infections. Ensure proper spacing for air circulation and avoid overhead watering. What symptoms are you observing?",
    },
    Topic {
        keywords: &["irrigation", "water"],
        reply: "Proper irrigation is crucial for crop health. Water early morning or evening to reduce evaporation. Check soil moisture before watering - insert your finger 2-3 inches deep. Most crops need 1-1.5 inches of water weekly, including rainfall. Consider drip irrigation for water efficiency.",
    },
    Topic {
        keywords: &["soil", "organic"],
        reply: "Healthy soil is the foundation of good farming. Test soil pH regularly (6.0-7.0 is ideal for most crops). Add organic matter like compost to improve soil structure. Practice crop rotation to maintain soil fertility and reduce disease. Cover crops can also help during off-seasons.",
    },
    Topic {
        keywords: &["weather", "rain", "temperature"],
        reply: "Weather planning is essential for farming success. Monitor local weather forecasts daily. Protect crops from extreme weather using shade nets or row covers. Adjust irrigation based on rainfall. Plan planting and harvesting around weather patterns.",
    },
];

const GENERIC_REPLY: &str = "Thank you for your agricultural question! For the best advice, please provide more specific details about your crop, location, and the issue you're facing. I can help with pest management, fertilization, irrigation, soil health, and general farming practices.";

/// First topic whose keyword appears in the query wins
pub fn reply(query: &str) -> &'static str {
    let query = query.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| query.contains(k)))
        .map(|topic| topic.reply)
        .unwrap_or(GENERIC_REPLY)
}
