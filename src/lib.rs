pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod itunes {
            pub(crate) mod verify_receipt_request_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_validator_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod endpoint;
        pub mod receipt_response;
    }
    pub mod repositories {
        pub mod receipt_validator;
    }
}

pub mod errors;
pub mod secrets;
pub mod util;
