use std::collections::HashMap;
use std::env;
use std::fs;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub engine: HashMap<String, String>,
    pub animation: HashMap<String, u64>,
}

fn read_config_file() -> Result<ConfigFile, serde_json::Error> {
    let file_path = "config.json";
    let fallback_file_path = "../config.json";
    let config_contents = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(_) => fs::read_to_string(fallback_file_path).unwrap(),
    };
    serde_json::from_str(&config_contents)
}

fn parse_env_args(default_url: String) -> String {
    let mut url = default_url;

    let args: Vec<String> = env::args().collect();
    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--url" => {
                url = arg_pair[1].clone();
            },
            _ => {println!("illegal argument {}, skipping...", arg_pair[0]);},
        }
    }
    url
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub engine_url: String,
}

impl ControllerConfig {
    pub fn get() -> Self {
        let config_file = read_config_file().unwrap();
        let engine_url = parse_env_args(config_file.engine["url"].clone());

        ControllerConfig {
            engine_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub max_frame: u32,
    pub frame_rate: u64,
}

impl RendererConfig {
    pub fn get() -> Self {
        let config_file = read_config_file().unwrap();

        RendererConfig {
            max_frame: config_file.animation["max_frame"] as u32,
            frame_rate: config_file.animation["frame_rate"],
        }
    }
}
