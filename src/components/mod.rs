pub mod force_graph;
pub mod forms;
pub mod impacts;
