use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Style;
use crate::utils::table::{Column, Table};

/// Print the tone presets, marking the configured default.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let current = cfg.style()?;

    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("alias", 8),
        Column::new("style", 16),
        Column::new("", 9),
    ]);

    for st in Style::ALL {
        table.add_row(vec![
            st.number().to_string(),
            st.alias().to_string(),
            st.label().to_string(),
            if st == current { "(default)".into() } else { String::new() },
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
