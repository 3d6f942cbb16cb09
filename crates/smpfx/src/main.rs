#![forbid(unsafe_code)]

//! smpfx CLI: inspect and decode SM2 key containers.

use clap::{Parser, Subcommand};
use der::EncodePem;
use log::LevelFilter;
use smpfx_core::{algorithm, Error};
use smpfx_keys::x509;
use smpfx_pkcs12::{ContentEncoding, DecodeContext};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "smpfx",
    about = "smpfx: read SM2 key containers (SM2 key + certificate, SM4-CBC protected)",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the container layout without decrypting anything
    Inspect {
        /// Container file (base64 text unless --der)
        file: PathBuf,

        /// The file holds raw DER instead of base64 text
        #[arg(long)]
        der: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decrypt the private key and export it with its certificate
    Decode {
        /// Container file (base64 text unless --der)
        file: PathBuf,

        /// Container password
        #[arg(short, long)]
        password: String,

        /// The file holds raw DER instead of base64 text
        #[arg(long)]
        der: bool,

        /// Fail unless the private scalar matches the certificate public key
        #[arg(long)]
        check: bool,

        /// Never base64-decode the private key content
        #[arg(long = "raw-content")]
        raw_content: bool,

        /// Require the SM2_Data / SM4_CBC algorithm identifiers
        #[arg(long)]
        strict: bool,

        /// Private key output file, PKCS#8 PEM (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Certificate output file, PEM
        #[arg(long = "cert-out")]
        cert_out: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the supported container algorithms
    Info,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { file, der, verbose } => {
            init_logging(verbose);
            cmd_inspect(&file, der)
        }

        Commands::Decode {
            file,
            password,
            der,
            check,
            raw_content,
            strict,
            output,
            cert_out,
            verbose,
        } => {
            init_logging(verbose);
            let ctx = decode_context(check, raw_content, strict);
            cmd_decode(&file, &password, der, &ctx, output, cert_out)
        }

        Commands::Info => cmd_info(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::init();
    }
}

fn decode_context(check: bool, raw_content: bool, strict: bool) -> DecodeContext {
    let encoding = if raw_content {
        ContentEncoding::Raw
    } else {
        ContentEncoding::Auto
    };
    DecodeContext::new()
        .with_content_encoding(encoding)
        .with_verify_key_pair(check)
        .with_strict_algorithms(strict)
}

fn cmd_inspect(file: &Path, der: bool) -> Result<(), Error> {
    let data = read_container(file, der)?;
    let container = smpfx_pkcs12::parse_container(&data)?;

    println!("Version:            {}", container.version);
    println!("Private key data:   {}", container.private_key.curve_data_oid);
    println!("Private key cipher: {}", container.private_key.cipher_mode_oid);
    println!(
        "Private key blob:   {} bytes",
        container.private_key.content.len()
    );
    println!("Public key data:    {}", container.public_key.curve_data_oid);
    println!(
        "Certificate:        {} bytes",
        container.public_key.content.len()
    );

    match container.check_algorithms() {
        Ok(()) => println!("Algorithms:         SM2_Data / SM4_CBC"),
        Err(e) => println!("Algorithms:         {e}"),
    }

    match x509::parse_certificate(&container.public_key.content) {
        Ok(cert) => {
            println!("Subject:            {}", x509::subject(&cert));
            println!("Serial:             {}", x509::serial_hex(&cert));
        }
        Err(e) => println!("Subject:            ({e})"),
    }
    Ok(())
}

fn cmd_decode(
    file: &Path,
    password: &str,
    der: bool,
    ctx: &DecodeContext,
    output: Option<PathBuf>,
    cert_out: Option<PathBuf>,
) -> Result<(), Error> {
    let data = read_container(file, der)?;
    let (key, cert) = smpfx_pkcs12::decode_with_context(&data, password, ctx)?;

    eprintln!("Subject:    {}", x509::subject(&cert));
    eprintln!("Public key: {}", hex::encode(key.public_key_sec1()));

    let pem = key.to_pkcs8_pem()?;
    write_output(output, pem.as_bytes())?;

    if let Some(path) = cert_out {
        let cert_pem = cert
            .to_pem(der::pem::LineEnding::LF)
            .map_err(|e| Error::Certificate(format!("PEM encoding failed: {e}")))?;
        std::fs::write(&path, cert_pem)?;
    }
    Ok(())
}

fn cmd_info() -> Result<(), Error> {
    println!("smpfx: SM2 key container reader");
    println!();
    println!("Container content types:");
    println!("  SM2_Data  {}", algorithm::dotted(algorithm::SM2_DATA));
    println!();
    println!("Private key ciphers:");
    println!(
        "  SM4-CBC   {}  (key/IV: SM3(password || 00000001))",
        algorithm::dotted(algorithm::SM4_CBC)
    );
    println!();
    println!("Certificate public keys:");
    println!("  SM2       {}", algorithm::dotted(algorithm::SM2_CURVE));
    println!();
    println!("Output formats:");
    println!("  PKCS#8 PEM private key, PEM certificate");
    Ok(())
}

// ── Utility functions ────────────────────────────────────────────────

fn read_container(path: &Path, der: bool) -> Result<Vec<u8>, Error> {
    if der {
        Ok(std::fs::read(path)?)
    } else {
        smpfx_pkcs12::read_container_file(path)
    }
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => Ok(std::fs::write(&p, data)?),
        None => {
            use std::io::Write;
            Ok(std::io::stdout().write_all(data)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_decode_arguments() {
        let cli = Cli::try_parse_from([
            "smpfx", "decode", "key.sm2", "-p", "secret", "--check", "--cert-out", "c.pem",
        ])
        .unwrap();
        match cli.command {
            Commands::Decode {
                file,
                password,
                check,
                raw_content,
                strict,
                output,
                cert_out,
                ..
            } => {
                assert_eq!(file, PathBuf::from("key.sm2"));
                assert_eq!(password, "secret");
                assert!(check);
                assert!(!raw_content);
                assert!(!strict);
                assert!(output.is_none());
                assert_eq!(cert_out, Some(PathBuf::from("c.pem")));
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_decode_requires_password() {
        assert!(Cli::try_parse_from(["smpfx", "decode", "key.sm2"]).is_err());
    }

    #[test]
    fn test_decode_context_flags() {
        let ctx = decode_context(false, false, false);
        assert_eq!(ctx.content_encoding, ContentEncoding::Auto);
        assert!(!ctx.verify_key_pair);
        assert!(!ctx.strict_algorithms);

        let ctx = decode_context(true, true, true);
        assert_eq!(ctx.content_encoding, ContentEncoding::Raw);
        assert!(ctx.verify_key_pair);
        assert!(ctx.strict_algorithms);
    }

    #[test]
    fn test_read_container_modes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        std::fs::write(&path, b"MAEC\n").unwrap();

        assert_eq!(read_container(&path, false).unwrap(), vec![0x30, 0x01, 0x02]);
        assert_eq!(read_container(&path, true).unwrap(), b"MAEC\n".to_vec());
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        std::fs::write(&path, [0x30, 0x01, 0x02]).unwrap();
        assert!(matches!(cmd_inspect(&path, true), Err(Error::Format(_))));
    }
}
