pub mod filterdtos;
pub mod locationdtos;
pub mod querydtos;
