pub mod token;

#[derive(Debug)]
pub enum Error {
    IoError {
        message: String,
        error: std::io::Error,
    },
    HttpError(reqwest::Error),
    JWTError(jsonwebtoken::errors::Error),
    MissingScope,
    UnexpectedApiResponse {
        expected_type: String,
        json: serde_json::Value,
    },
}

impl Error {
    pub fn unexpected_api_response<T>(json: serde_json::Value) -> Error {
        let expected_type = std::any::type_name::<T>().to_owned();
        Error::UnexpectedApiResponse {
            expected_type,
            json,
        }
    }

    pub fn io_error(message: String, error: std::io::Error) -> Error {
        Error::IoError { message, error }
    }
}

type TokenResult<T> = std::result::Result<T, Error>;
