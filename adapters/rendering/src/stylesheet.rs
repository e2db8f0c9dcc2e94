//! Stylesheet that turns the matrix custom properties into a pulsing grid.
//!
//! The cell elements only carry custom properties; playback is left entirely
//! to the browser's CSS animation engine.

/// Fill colour for each built-in palette code.
pub const PALETTE_COLORS: [(i32, &str); 9] = [
    (1, "#ff595e"),
    (2, "#ff924c"),
    (3, "#ffca3a"),
    (4, "#c5ca30"),
    (5, "#8ac926"),
    (6, "#36949d"),
    (7, "#1982c4"),
    (8, "#4267ac"),
    (9, "#6a4c93"),
];

const BASE_RULES: &str = r#"html, body {
  margin: 0;
  height: 100%;
  overflow: hidden;
  background: #05060a;
}

.matrix {
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  width: 100vw;
  height: 100vh;
}

.matrix__row {
  display: flex;
}

.matrix__cell {
  width: var(--cell-size);
  height: var(--cell-size);
  box-sizing: border-box;
  animation: matrix-pulse var(--cell-duration, 2.5s) ease-in-out
    var(--cell-delay, 0s) infinite alternate;
}

@keyframes matrix-pulse {
  from {
    transform: scale(var(--cell-animation-scale-min, 0.5));
    opacity: 0.15;
    filter: blur(0);
  }
  to {
    transform: scale(var(--cell-animation-scale-max, 2));
    opacity: var(--cell-animation-opacity-max, 0.5);
    filter: blur(var(--cell-animation-blur-max, 4px));
  }
}
"#;

/// Complete stylesheet: layout, pulse keyframes and palette colours.
#[must_use]
pub fn matrix_stylesheet() -> String {
    let mut css = String::from(BASE_RULES);
    for (code, color) in PALETTE_COLORS {
        css.push_str(&format!(
            "\n.matrix__cell--m-{code} {{\n  background: {color};\n}}\n"
        ));
    }
    css
}
