#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-careboard-ui]";

/// Default CSS for the dashboard along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --careboard-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --careboard-bg: #ffffff;
  --careboard-card-bg: #ffffff;
  --careboard-card-border: rgba(148, 163, 184, 0.28);
  --careboard-radius: 16px;
  --careboard-text: #1f2933;
  --careboard-muted: #52606d;
  --careboard-heading: #11181c;
  --careboard-surface: #f8fafc;
  --careboard-accent: #2563eb;
  --careboard-grid-line: rgba(255, 255, 255, 0.06);
}

.careboard-root {
  font-family: var(--careboard-font-family);
  background: var(--careboard-bg);
  color: var(--careboard-text);
  border-radius: var(--careboard-radius);
  display: grid;
  gap: 26px;
  padding: 28px;
  grid-template-columns: minmax(280px, 0.8fr) minmax(420px, 1.6fr);
  box-shadow: 0 24px 48px rgba(15, 23, 42, 0.1);
}

.profile-card {
  background: var(--careboard-card-bg);
  border: 1px solid var(--careboard-card-border);
  border-radius: var(--careboard-radius);
  padding: 20px;
}

.profile-card h2 {
  margin: 0 0 12px;
  color: var(--careboard-heading);
}

#patientAvatar {
  width: 120px;
  height: 120px;
  border-radius: 50%;
  background-size: cover;
  background-position: center;
  margin: 0 auto 16px;
}

.profile-field {
  display: flex;
  justify-content: space-between;
  padding: 8px 0;
  border-bottom: 1px solid var(--careboard-card-border);
}

.profile-field .label {
  color: var(--careboard-muted);
}

#vitalsList {
  list-style: none;
  margin: 0;
  padding: 0;
}

#vitalsList li {
  display: flex;
  justify-content: space-between;
  padding: 10px 12px;
  border-radius: 10px;
  background: var(--careboard-surface);
  margin-bottom: 8px;
}

#vitalsList .label {
  color: var(--careboard-muted);
}

#vitalsList .value {
  font-weight: 600;
}

#diagnosisList {
  margin: 0;
  padding-left: 20px;
}

#diagnosisList li {
  padding: 6px 0;
  color: var(--careboard-text);
}

.chart-card {
  background: var(--careboard-card-bg);
  border: 1px solid var(--careboard-card-border);
  border-radius: var(--careboard-radius);
  padding: 20px;
  min-height: 280px;
}

@media (max-width: 1080px) {
  .careboard-root {
    grid-template-columns: 1fr;
  }
}

@media (max-width: 640px) {
  .careboard-root {
    padding: 18px;
  }

  .profile-field {
    flex-direction: column;
    gap: 4px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-careboard-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
