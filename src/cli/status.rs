use tabled::Table;

use crate::{
    config::Config,
    error,
    graph::{PlaylistRepository, StoreFactory},
    info,
    types::NodeCountRow,
};

pub async fn status(config: &Config) {
    let store = match config.store.open().await {
        Ok(store) => store,
        Err(e) => error!("Database Error: {}", e),
    };

    let counts = match PlaylistRepository::new(store).count_nodes().await {
        Ok(counts) => counts,
        Err(e) => error!("Database Error: {}", e),
    };

    if counts.is_empty() {
        info!("Graph '{}' is empty.", config.store.graph);
        return;
    }

    let rows: Vec<NodeCountRow> = counts
        .into_iter()
        .map(|(label, count)| NodeCountRow { label, count })
        .collect();
    println!("{}", Table::new(rows));
}
