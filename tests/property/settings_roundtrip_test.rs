//! Property-based tests for BoardSettings serialization round-trip.

use boardvault::types::settings::BoardSettings;
use proptest::prelude::*;

fn arb_settings() -> impl Strategy<Value = BoardSettings> {
    (
        "[a-z][a-z0-9-]{0,30}",
        1usize..100,
        0u64..60_000,
        any::<bool>(),
        proptest::option::of("/[a-z0-9/]{1,40}\\.db"),
    )
        .prop_map(
            |(workspace_id, page_size, toast_duration_ms, anonymous_auth, database_path)| {
                BoardSettings {
                    workspace_id,
                    page_size,
                    toast_duration_ms,
                    anonymous_auth,
                    database_path,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: BoardSettings = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, settings);
    }
}
