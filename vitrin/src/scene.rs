//! Mapping from a product category to the staging scene it is shot in.

/// Scene used when no category keyword matches.
pub const DEFAULT_SCENE: &str = "sade ve aydınlık bir arka plan";

/// Ordered keyword table. Each entry pairs the Turkish/English synonyms
/// for one category with its scene; the first matching entry wins.
const SCENE_TABLE: &[(&[&str], &str)] = &[
    (&["giyim", "clothing"], "manken üzerinde, sade stüdyo fonu"),
    (&["mobilya", "furniture"], "iç mekan, modern ve aydınlık bir odada"),
    (
        &["ev dekorasyonu", "home decor"],
        "şık bir raf, masa veya duvar sahnesinde",
    ),
    (
        &["aksesuar", "accessory"],
        "yakın plan, lüks bir sunum yüzeyinde",
    ),
    (
        &["kozmetik", "cosmetic"],
        "temiz ve minimalist bir stüdyo ortamında, su damlalarıyla",
    ),
];

/// Pick the staging scene for a classified category.
///
/// Total: matching is a case-insensitive substring test, so any input
/// (empty, mixed case, surrounding text, garbage) yields a scene.
#[must_use]
pub fn scene_for_category(category: &str) -> &'static str {
    let lowered = category.to_lowercase();
    for (keywords, scene) in SCENE_TABLE {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return scene;
        }
    }
    DEFAULT_SCENE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_map_to_their_scene() {
        assert_eq!(
            scene_for_category("giyim"),
            "manken üzerinde, sade stüdyo fonu"
        );
        assert_eq!(
            scene_for_category("furniture"),
            "iç mekan, modern ve aydınlık bir odada"
        );
        assert_eq!(
            scene_for_category("kozmetik"),
            "temiz ve minimalist bir stüdyo ortamında, su damlalarıyla"
        );
    }

    #[test]
    fn test_synonyms_share_a_scene() {
        assert_eq!(
            scene_for_category("clothing"),
            scene_for_category("giyim")
        );
        assert_eq!(
            scene_for_category("home decor"),
            scene_for_category("ev dekorasyonu")
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(scene_for_category("GIYIM"), scene_for_category("giyim"));
        assert_eq!(
            scene_for_category("Aksesuar"),
            "yakın plan, lüks bir sunum yüzeyinde"
        );
    }

    #[test]
    fn test_keyword_matches_inside_surrounding_text() {
        assert_eq!(
            scene_for_category("modern mobilya koleksiyonu"),
            "iç mekan, modern ve aydınlık bir odada"
        );
    }

    #[test]
    fn test_unmatched_input_falls_back_to_default() {
        assert_eq!(scene_for_category(""), DEFAULT_SCENE);
        assert_eq!(scene_for_category("unknown"), DEFAULT_SCENE);
        assert_eq!(scene_for_category("\u{fffd}\u{fffd}"), DEFAULT_SCENE);
    }

    #[test]
    fn test_first_table_entry_wins() {
        // Input naming two categories resolves by table order.
        assert_eq!(
            scene_for_category("giyim ve aksesuar"),
            "manken üzerinde, sade stüdyo fonu"
        );
    }
}
