pub mod envelope;
pub mod mock_publisher;
