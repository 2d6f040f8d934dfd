//! Tests for embedded templates and placeholder substitution

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tilebloom::generator::template::{CONSOLE_TEMPLATE, JSON_TEMPLATE};
    use tilebloom::generator::{Bindings, Placeholder, Template};
    use tilebloom::runtime::TileParams;
    use tilebloom::sink::SinkKind;

    const DEFAULTS: TileParams = TileParams {
        width: 160,
        height: 120,
        tile: 32,
        var_threshold: 400.0,
        brightness_threshold: 9999.0,
        seed: 1,
    };

    // Tests both embedded templates are well formed
    // Verified by duplicating a placeholder in a template
    #[test]
    fn test_templates_are_well_formed() {
        for template in [CONSOLE_TEMPLATE, JSON_TEMPLATE] {
            assert!(template.is_well_formed(), "{}", template.name());
            for &placeholder in template.placeholders() {
                assert_eq!(template.occurrences(placeholder), 1);
            }
        }
    }

    // Tests only the JSON variant declares the output path
    // Verified by declaring the path in both templates
    #[test]
    fn test_json_path_declared_by_json_only() {
        assert!(!CONSOLE_TEMPLATE.declares(Placeholder::JsonPath));
        assert_eq!(CONSOLE_TEMPLATE.occurrences(Placeholder::JsonPath), 0);
        assert!(JSON_TEMPLATE.declares(Placeholder::JsonPath));
        assert_eq!(JSON_TEMPLATE.placeholders().len(), Placeholder::ALL.len());
    }

    // Tests template selection follows the sink
    // Verified by always returning the console template
    #[test]
    fn test_for_sink() {
        assert_eq!(
            Template::for_sink(SinkKind::Console).name(),
            CONSOLE_TEMPLATE.name()
        );
        assert_eq!(
            Template::for_sink(SinkKind::Json).name(),
            JSON_TEMPLATE.name()
        );
    }

    // Tests rendered source carries every literal and no tokens
    // Verified by skipping substitution of the seed
    #[test]
    fn test_render_console_defaults() {
        let bindings = Bindings::new(DEFAULTS, Path::new("out.json"));
        let source = CONSOLE_TEMPLATE.render(&bindings).unwrap();

        assert!(source.contains("const WIDTH: usize = 160;"));
        assert!(source.contains("const HEIGHT: usize = 120;"));
        assert!(source.contains("const TILE: usize = 32;"));
        assert!(source.contains("const VAR_THRESHOLD: f32 = 400.0;"));
        assert!(source.contains("const SEED: u32 = 1;"));
        assert!(source.contains("const BRIGHTNESS_THRESHOLD: f32 = 9999.0;"));
        assert!(!source.contains("{{"));
        assert!(!source.contains("out.json"));
    }

    // Tests the JSON path is emitted as an escaped string literal
    // Verified by inserting the raw path
    #[test]
    fn test_render_json_path_literal() {
        let bindings = Bindings::new(DEFAULTS, Path::new("reports/\"q\".json"));
        let source = JSON_TEMPLATE.render(&bindings).unwrap();

        assert!(source.contains(r#"const JSON_PATH: &str = "reports/\"q\".json";"#));
        assert!(!source.contains("{{"));
    }

    // Tests float literals always keep a decimal point or exponent
    // Verified by formatting with Display
    #[test]
    fn test_float_bindings_are_float_literals() {
        let bindings = Bindings::new(
            TileParams {
                var_threshold: 12.5,
                brightness_threshold: 200.0,
                ..DEFAULTS
            },
            Path::new("out.json"),
        );

        assert_eq!(bindings.value(Placeholder::VarThreshold), "12.5");
        assert_eq!(bindings.value(Placeholder::BrightnessThreshold), "200.0");
        assert_eq!(bindings.value(Placeholder::Seed), "1");
        assert_eq!(bindings.value(Placeholder::JsonPath), "\"out.json\"");
    }
}
