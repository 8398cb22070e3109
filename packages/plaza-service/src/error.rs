pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Intent provider error: {message}")]
	Intent { message: String },
	#[error("Retriever provider error: {message}")]
	Retriever { message: String },
}
