//! Infrastructure adapter for uploading finished files over plain FTP.

use crate::config::DestinationConfig;
use crate::domain::errors::Result;
use crate::ports::transfer_port::TransferPort;
use log::info;
use std::fs::File;
use std::path::Path;
use suppaftp::types::FileType;
use suppaftp::FtpStream;

/// Concrete implementation of `TransferPort` for an FTP destination.
///
/// Credentials are held here; every upload opens a fresh session, stores the
/// whole file in binary mode, and closes the session once the server
/// acknowledges.
pub struct FtpTransfer {
    host: String,
    folder: String,
    login: String,
    password: String,
}

impl FtpTransfer {
    pub fn new(config: &DestinationConfig) -> Self {
        Self {
            host: config.host.clone(),
            folder: config.folder.clone(),
            login: config.login.clone(),
            password: config.password.clone(),
        }
    }

    /// Address the control connection dials: port 21 unless the configured
    /// host carries its own.
    fn endpoint(&self) -> String {
        if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:21", self.host)
        }
    }
}

impl TransferPort for FtpTransfer {
    fn upload(&mut self, local: &Path, remote_name: &str) -> Result<()> {
        let mut session = FtpStream::connect(self.endpoint())?;
        session.login(&self.login, &self.password)?;
        if !self.folder.is_empty() {
            session.cwd(&self.folder)?;
        }
        session.transfer_type(FileType::Binary)?;

        let mut file = File::open(local)?;
        let bytes = session.put_file(remote_name, &mut file)?;
        session.quit()?;

        info!("Transferred {} bytes as {}", bytes, remote_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(host: &str) -> FtpTransfer {
        FtpTransfer::new(&DestinationConfig {
            host: host.into(),
            folder: String::new(),
            login: "user".into(),
            password: "pass".into(),
        })
    }

    #[test]
    fn test_endpoint_defaults_to_port_21() {
        assert_eq!(transfer("files.example.com").endpoint(), "files.example.com:21");
    }

    #[test]
    fn test_endpoint_keeps_explicit_port() {
        assert_eq!(transfer("files.example.com:2121").endpoint(), "files.example.com:2121");
    }
}
