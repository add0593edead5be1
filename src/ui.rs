//! Small pieces of presentation state the dashboard delegates to the server.

use crate::config::ThemeColors;

pub const COLLAPSED_CLASS: &str = "collapsed";

/// Toggle the `collapsed` class on a space separated class list.
pub fn toggle_collapsed(class_name: &str) -> String {
    if class_name.is_empty() {
        return COLLAPSED_CLASS.to_string();
    }

    let mut classes: Vec<&str> = class_name.split(' ').collect();
    match classes.iter().position(|c| *c == COLLAPSED_CLASS) {
        Some(index) => {
            classes.remove(index);
            classes.join(" ")
        }
        None => format!("{} {}", class_name, COLLAPSED_CLASS),
    }
}

/// Stylesheet exposing the theme colors as CSS custom properties
pub fn theme_css(theme: &ThemeColors) -> String {
    format!(
        "/* Generated theme settings css file */\n:root {{\n    --theme: {};\n    --theme-secondary: {};\n}}\n",
        theme.primary, theme.secondary
    )
}
