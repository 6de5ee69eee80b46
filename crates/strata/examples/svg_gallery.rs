use strata::{render_svg, Size, ThemeKind, ViewKind};

const PAYLOAD: &str = r#"{
  "name": "package",
  "children": [
    {"name": "name", "value": "\"strata\""},
    {"name": "version", "value": "0.1.0"},
    {"name": "dependencies", "children": [
      {"name": "serde", "value": "1.0"},
      {"name": "tracing", "value": "0.1"}
    ]}
  ]
}"#;

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir();
    for view in [ViewKind::Tree, ViewKind::Columns, ViewKind::Force] {
        for theme in [ThemeKind::Light, ThemeKind::Dark] {
            let svg = render_svg(PAYLOAD, view, theme, Size::new(900.0, 600.0))?;
            let path = dir.join(format!("strata-{}-{}.svg", view, theme));
            std::fs::write(&path, svg)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
