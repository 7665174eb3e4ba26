use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::registry;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands) -> AppResult<()> {
    let Commands::Tables { columns } = cmd else {
        return Ok(());
    };

    let mut table = Table::new(vec![
        Column {
            header: "Table".to_string(),
            width: 18,
        },
        Column {
            header: "Role".to_string(),
            width: 12,
        },
        Column {
            header: "Columns".to_string(),
            width: 7,
        },
        Column {
            header: "Key".to_string(),
            width: 30,
        },
    ]);

    for def in registry::tables() {
        table.add_row(vec![
            def.name.to_string(),
            def.role.to_string(),
            def.columns.len().to_string(),
            def.key.join(", "),
        ]);
    }
    print!("{}", table.render());

    if *columns {
        for def in registry::tables() {
            println!("\n{}:", def.name);
            println!("  {}", def.columns.join(", "));
        }
    }

    Ok(())
}
