pub mod dispatcher_config;
