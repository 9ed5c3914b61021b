pub mod detection_queries;
