// Infrastructure adapters implementing the application ports
pub mod csv_output_adapter;
pub mod workbook_input_adapter;

pub use csv_output_adapter::CsvOutputAdapter;
pub use workbook_input_adapter::WorkbookInputAdapter;
