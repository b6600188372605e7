use std::{
    env,
    path::{Path, PathBuf},
};

use argh::FromArgs;

#[derive(FromArgs, PartialEq, Debug)]
/// Top-level command.
struct Args {
    #[argh(subcommand)]
    subcommand: SubCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommand {
    Coverage(CoverageArgs),
    ContinuousIntegration(CIArgs),
    Fuzz(FuzzArgs),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Collect test coverage data.
#[argh(subcommand, name = "cov")]
struct CoverageArgs {
    #[argh(switch)]
    /// produce an html report instead of the default .lcov file.
    report: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Run the continuous integration validation tests.
#[argh(subcommand, name = "ci")]
struct CIArgs {
    #[argh(switch)]
    /// attempt to automatically fix format and clippy errors.
    fix: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Run one of the cargo-fuzz targets in the fuzz/ directory.
#[argh(subcommand, name = "fuzz")]
struct FuzzArgs {
    #[argh(positional, default = "String::from(\"parse\")")]
    /// fuzz target to run, `tokenize` or `parse`.
    target: String,

    #[argh(option, default = "60")]
    /// number of seconds to run the fuzzer for.
    seconds: u32,
}

fn main() -> Result<(), DynError> {
    let args: Args = argh::from_env();
    match args.subcommand {
        SubCommand::Coverage(cov_args) => {
            coverage(cov_args.report)?;
        }
        SubCommand::ContinuousIntegration(ci_args) => {
            ci(ci_args.fix)?;
        }
        SubCommand::Fuzz(fuzz_args) => {
            fuzz(&fuzz_args.target, fuzz_args.seconds)?;
        }
    };

    Ok(())
}

type DynError = Box<dyn std::error::Error>;

fn coverage(report: bool) -> Result<(), DynError> {
    let cov_path = project_root().join("target").join("coverage");
    fs_extra::dir::create_all(&cov_path, true)?;

    // Collect the coverage information by invoking `cargo test` with the appropriate environment
    // variables.
    println!("** collecting coverage information.");
    let cargo = cargo();
    duct::cmd!(cargo, "test", "--tests")
        .env("CARGO_INCREMENTAL", "0")
        .env("RUSTFLAGS", "-C instrument-coverage")
        .env("LLVM_PROFILE_FILE", "cargo-test-%p-%m.profraw")
        .run()?;

    // Now invoke grcov to coallate the coverage data into either html report or lcov file.
    println!("** coallating coverage data.");
    let (output_format, output_path) = if report {
        ("html", cov_path.join("html"))
    } else {
        ("lcov", cov_path.join("tests.lcov"))
    };
    duct::cmd!(
        "grcov",
        ".",
        "--binary-path",
        project_root().join("target").join("debug").join("deps"),
        "-s",
        ".",
        "-t",
        output_format,
        "--branch",
        "--ignore-not-existing",
        "--ignore", // ignore stuff outside root project directory
        "../*",
        "--ignore", // ignore stuff with a fully specified path (likely system libs)
        "/*",
        "--ignore", // ignore everything in this xtask folder
        "xtask/*",
        "--ignore", // ignore integration test code, this always runs in a test build!
        "lang/tests/*",
        "--ignore", // ignore the fuzz targets, they only run under cargo-fuzz
        "fuzz/*",
        "--ignore", // ignore the unittest code, always runs.
        "*_unittests.rs",
        "-o",
        output_path,
    )
    .run()?;

    // Cleanup any .profraw files in the project.
    println!("** cleaning up *.profraw files.");
    let profraw_files: Vec<PathBuf> = glob::glob("**/*.profraw")?.collect::<Result<_, _>>()?;
    profraw_files.iter().try_for_each(fs_extra::file::remove)?;

    if report {
        println!("** done. Generated coverage report in target/coverage/html/index.html.");
    } else {
        println!("** done. Machine-readable coverage report in target/coverage/tests.lcov")
    }
    Ok(())
}

fn ci(fix: bool) -> Result<(), DynError> {
    let cargo = cargo();
    if fix {
        println!("** automatically fixing code formatting with `cargo fmt --all`");
        duct::cmd!(&cargo, "fmt", "--all",).run()?;
    } else {
        println!("** checking code formatting with `cargo fmt --all -- --check`");
        duct::cmd!(&cargo, "fmt", "--all", "--", "--check",).run()?;
    }

    if fix {
        println!("** automatically fixing clippy issues with `cargo clippy -- --fix`");
        duct::cmd!(&cargo, "clippy", "--fix").run()?;
    } else {
        println!("** linting code with `cargo clippy -- --deny all`");
        duct::cmd!(&cargo, "clippy", "--", "--deny", "clippy::all",).run()?;
    }

    println!("** building and testing code with `RUSTFLAGS=\"-D warnings\" cargo test`");
    duct::cmd!(&cargo, "test").env("RUSTFLAGS", "-D warnings").run()?;

    println!("** all checks passed!");
    Ok(())
}

fn fuzz(target: &str, seconds: u32) -> Result<(), DynError> {
    let corpus = project_root().join("fuzz").join("corpus").join(target);
    fs_extra::dir::create_all(&corpus, false)?;

    // Seed the corpus with the test modules so the fuzzer starts from valid syntax.
    let pattern = project_root().join("lang").join("tests").join("modules").join("*.Mod");
    let seeds: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?.collect::<Result<_, _>>()?;
    let mut options = fs_extra::file::CopyOptions::new();
    options.skip_exist = true;
    for seed in &seeds {
        if let Some(name) = seed.file_name() {
            fs_extra::file::copy(seed, corpus.join(name), &options)?;
        }
    }
    println!("** seeded {} with {} modules.", corpus.display(), seeds.len());

    println!("** fuzzing `{}` for {} seconds with `cargo +nightly fuzz run`", target, seconds);
    let max_time = format!("-max_total_time={}", seconds);
    duct::cmd!("cargo", "+nightly", "fuzz", "run", target, &corpus, "--", max_time)
        .dir(project_root())
        .run()?;

    println!("** no crashes found.");
    Ok(())
}

fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}

fn cargo() -> String {
    env::var("CARGO").unwrap_or_else(|_| "cargo".to_string())
}
