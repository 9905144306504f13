pub mod credentials_body;
