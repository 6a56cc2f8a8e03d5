pub mod array;
pub mod external;
pub mod string;
