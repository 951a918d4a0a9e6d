pub mod palette_table_csv;
