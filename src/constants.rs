/// Fixed paths inside the kaniko executor image
pub mod path {
    /// Docker config read by kaniko to resolve registry credentials
    pub const DOCKER_CONFIG: &str = "/kaniko/.docker/config.json";

    /// File the executor writes the pushed image digest to
    pub const DIGEST_FILE: &str = "/kaniko/digest-file";

    /// The kaniko executor binary
    pub const EXECUTOR: &str = "/kaniko/executor";

    /// Optional file listing tags, read when no tags are configured
    pub const TAGS_FILE: &str = ".tags";
}

/// Environment variable names
pub mod env {
    /// AWS access key exported for the credential helper
    pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

    /// AWS secret key exported for the credential helper
    pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

    /// Path of a dotenv file loaded before flags are parsed
    pub const PLUGIN_ENV_FILE: &str = "PLUGIN_ENV_FILE";
}

/// ECR registry constants
pub mod ecr {
    /// Domain prefix of the public ECR registry
    pub const PUBLIC_DOMAIN: &str = "public.ecr.aws";

    /// Region used when none is configured
    pub const DEFAULT_REGION: &str = "us-east-1";

    /// Credential helper name, resolved by docker as `docker-credential-ecr-login`
    pub const CREDENTIAL_HELPER: &str = "ecr-login";
}

/// Container image tag constants
pub mod tag {
    /// Default container image tag
    pub const DEFAULT: &str = "latest";
}

/// Artifact metadata constants
pub mod artifact {
    /// Registry type recorded in the artifact file
    pub const REGISTRY_TYPE_ECR: &str = "ECR";

    /// Kind of the docker artifact document
    pub const DOCKER_V1: &str = "docker/v1";
}
