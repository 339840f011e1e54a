pub mod report_grid;
