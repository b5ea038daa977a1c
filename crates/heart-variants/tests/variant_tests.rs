use heart_core::{AudioSink, Color, Easer};
use heart_variants::registry::{ABSORB_EASE, CONSUME_DELAY, ORB_COLOR_BEGIN, ORB_COUNT};
use heart_variants::{
    MenuHost, MenuItem, NumberEntry, SettingValue, TextEntry, TextMenu, Variant, VariantSettings,
    VariantValue, Variants,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

// ── Helpers ──────────────────────────────────────────────────────

/// Records sounds and holds the last dialog the menu asked for.
#[derive(Default)]
struct RecordingHost {
    sounds: Mutex<Vec<String>>,
    number: Mutex<Option<NumberEntry>>,
    text: Mutex<Option<TextEntry>>,
}

impl AudioSink for RecordingHost {
    fn play(&self, event: &str) {
        self.sounds.lock().unwrap().push(event.to_string());
    }
}

impl MenuHost for RecordingHost {
    fn number_entry(&self, entry: NumberEntry) {
        *self.number.lock().unwrap() = Some(entry);
    }

    fn text_entry(&self, entry: TextEntry) {
        *self.text.lock().unwrap() = Some(entry);
    }
}

fn menu_for(variants: &Variants) -> TextMenu {
    let mut menu = TextMenu::new();
    variants.add_all_to_menu(&mut menu);
    menu
}

// ── 1. Sampling ──────────────────────────────────────────────────

#[test]
fn defaults_sample_within_documented_ranges() {
    let variants = Variants::new();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let delay = variants.consume_delay.sample_with(&mut rng);
        assert!((0.7..1.0 + 1e-6).contains(&delay));
        let speed = variants.burst_speed.sample_with(&mut rng);
        assert!((80.0..120.0 + 1e-4).contains(&speed));
        let dir = variants.burst_direction.sample_with(&mut rng);
        assert!((0.0..std::f32::consts::TAU + 1e-5).contains(&dir));
    }
    assert_eq!(variants.orb_count.value(), 10);
    assert_eq!(variants.curve_midpoint_multiplier.value(), 1.0);
}

#[test]
fn spread_reads_are_not_constant() {
    let variants = Variants::new();
    let first = variants.consume_duration.value();
    let differs = (0..50).any(|_| (variants.consume_duration.value() - first).abs() > 1e-4);
    assert!(differs);
}

// ── 2. Reset ─────────────────────────────────────────────────────

#[test]
fn reset_all_restores_every_default() {
    let variants = Variants::new();
    let pristine = variants.settings();

    variants.orb_count.set_base(4);
    variants.orb_count.set_rand(2);
    variants.orb_color_end.set_value(Color::rgba(1, 2, 3, 4));
    variants.absorb_ease.set_value(Easer::BounceOut);
    variants.non_curved_absorb.set_value(true);
    variants.burst_y_offset.set_base(-12.5);
    assert_ne!(variants.settings(), pristine);

    variants.reset_all();
    assert_eq!(variants.settings(), pristine);
    assert_eq!(variants.get(ORB_COUNT), VariantValue::Int(10));
    assert_eq!(variants.get(ABSORB_EASE), VariantValue::Easer(Easer::CubeIn));
}

#[test]
fn reset_refreshes_live_widgets() {
    let variants = Variants::new();
    let menu = menu_for(&variants);

    variants.orb_count.set_base(25);
    variants.non_curved_absorb.set_value(true);
    assert!(menu.find_button("Orb Count (Base): 25").is_some());
    assert!(menu.find_on_off("Non-Curved Absorb").unwrap().is_on());

    variants.reset_all();
    assert!(menu.find_button("Orb Count (Base): 10").is_some());
    assert!(!menu.find_on_off("Non-Curved Absorb").unwrap().is_on());
    assert_eq!(menu.find_slider(ABSORB_EASE).unwrap().value_name(), "CubeIn");
}

#[test]
fn reset_after_menu_dropped_is_harmless() {
    let variants = Variants::new();
    drop(menu_for(&variants));
    variants.orb_color_begin.set_value(Color::BLACK);
    variants.reset_all();
    assert_eq!(variants.orb_color_begin.value(), Color::WHITE);
}

// ── 3. Menu widgets ──────────────────────────────────────────────

#[test]
fn menu_rows_follow_declaration_order() {
    let variants = Variants::new();
    let menu = menu_for(&variants);
    let rows: Vec<String> = menu.items().iter().map(MenuItem::display).collect();
    assert_eq!(rows[0], "Orb Count (Base): 10");
    assert_eq!(rows[1], "Orb Count (Rand): 0");
    assert_eq!(rows[2], "Orb Color (Begin): FFFFFFFF");
    assert_eq!(rows[3], "Orb Color (End): FFFFFFFF");
    assert_eq!(rows[4], "Consume Delay (Base): 0.7");
    assert_eq!(rows.last().unwrap(), "Absorb Curve Midpoint Multiplier (Rand): 0");
    // 9 ranged variants x 2 buttons + 2 colors + 1 slider + 1 toggle
    assert_eq!(rows.len(), 22);
}

#[test]
fn number_entry_commit_updates_value_and_label() {
    let variants = Variants::new();
    let menu = menu_for(&variants);
    let host = RecordingHost::default();

    menu.find_button("Orb Count (Base)").unwrap().press(&host);
    assert_eq!(host.sounds.lock().unwrap().as_slice(), ["event:/ui/main/savefile_rename_start"]);

    let entry = host.number.lock().unwrap().take().unwrap();
    assert_eq!(entry.initial, 10.0);
    assert_eq!(entry.max_digits, 12);
    assert!(!entry.allow_decimal);
    assert!(entry.allow_negative);
    (entry.on_commit)(3.9);

    assert_eq!(variants.orb_count.base(), 3);
    assert!(menu.find_button("Orb Count (Base): 3").is_some());
}

#[test]
fn float_entry_allows_decimals() {
    let variants = Variants::new();
    let menu = menu_for(&variants);
    let host = RecordingHost::default();

    menu.find_button("Consume Delay (Rand)").unwrap().press(&host);
    let entry = host.number.lock().unwrap().take().unwrap();
    assert!(entry.allow_decimal);
    (entry.on_commit)(0.05);
    assert!((variants.consume_delay.rand() - 0.05).abs() < 1e-6);
}

#[test]
fn color_entry_falls_back_on_malformed_text() {
    let variants = Variants::new();
    let menu = menu_for(&variants);
    let host = RecordingHost::default();

    menu.find_button(ORB_COLOR_BEGIN).unwrap().press(&host);
    let entry = host.text.lock().unwrap().take().unwrap();
    assert_eq!(entry.initial, "FFFFFFFF");
    (entry.on_commit)("FF0080C0".to_string());
    assert_eq!(variants.orb_color_begin.value(), Color::rgba(0xFF, 0x00, 0x80, 0xC0));

    menu.find_button(ORB_COLOR_BEGIN).unwrap().press(&host);
    let entry = host.text.lock().unwrap().take().unwrap();
    (entry.on_commit)("F00".to_string());
    assert_eq!(variants.orb_color_begin.value(), Color::WHITE);
}

// ── 4. Settings snapshot ─────────────────────────────────────────

#[test]
fn settings_roundtrip_through_json() {
    let variants = Variants::new();
    variants.consume_delay.set_base(0.25);
    variants.orb_color_end.set_value(Color::rgba(0x10, 0x20, 0x30, 0x40));
    let json = serde_json::to_string(&variants.settings()).unwrap();
    assert!(json.contains("\"Orb Color (End)\":{\"kind\":\"color\",\"value\":\"10203040\"}"));

    let restored = Variants::new();
    let parsed: VariantSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.apply_settings(&parsed), 13);
    assert_eq!(restored.consume_delay.base(), 0.25);
    assert_eq!(restored.orb_color_end.value(), Color::rgba(0x10, 0x20, 0x30, 0x40));
}

#[test]
fn apply_settings_skips_unknown_and_mismatched() {
    let variants = Variants::new();
    let mut settings = VariantSettings::default();
    settings.entries.insert("Heart Size".into(), SettingValue::Bool { value: true });
    settings.entries.insert(CONSUME_DELAY.into(), SettingValue::Bool { value: true });
    settings.entries.insert(ORB_COUNT.into(), SettingValue::Int { base: 2, rand: 1 });
    assert_eq!(variants.apply_settings(&settings), 1);
    assert_eq!(variants.orb_count.base(), 2);
    assert_eq!(variants.consume_delay.base(), 0.7);
}

#[test]
fn list_entries_are_the_typed_fields() {
    let variants = Variants::new();
    let as_dyn: Arc<dyn Variant> = variants.orb_count.clone();
    assert!(Arc::ptr_eq(&as_dyn, &variants.list()[0]));
}
