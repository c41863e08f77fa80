pub mod entity_select;
