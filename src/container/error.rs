#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid container id: {0}")]
    InvalidContainerID(String),
    #[error("docker CLI not found in PATH")]
    DockerNotFound,
    #[error("`docker ps` exited with {status}: {stderr}")]
    DockerPs {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("failed to invoke docker: {0}")]
    Spawn(std::io::Error),
}
pub type Result<T> = std::result::Result<T, Error>;
