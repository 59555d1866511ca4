pub mod probe;
pub mod request;
#[cfg(test)]
mod test_server;
