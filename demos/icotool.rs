use clap::{App, Arg, SubCommand};
use std::fs;
use std::path::PathBuf;
use tinyicon::{IconSet, IconSort};

//===========================================================================//

fn main() {
    let matches = App::new("icotool")
        .version(tinyicon::library_version())
        .about("Inspects and extracts images from ICO files")
        .subcommand(
            SubCommand::with_name("dump")
                .about("Prints the raw directory and bitmap headers")
                .arg(Arg::with_name("ico").required(true)),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extracts an image from an ICO file as a PNG")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("ico").required(true))
                .arg(Arg::with_name("index").required(true)),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists images in an ICO file")
                .arg(
                    Arg::with_name("largest")
                        .short("l")
                        .long("largest")
                        .help("Lists bigger and deeper images first"),
                )
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("dump") {
        let path = submatches.value_of("ico").unwrap();
        let icons = IconSet::open(path).unwrap();
        print!("{}", icons);
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        let path = submatches.value_of("ico").unwrap();
        let icons = IconSet::open(path).unwrap();
        let index = submatches.value_of("index").unwrap();
        let index = index.parse::<usize>().unwrap();
        let data = match icons.image_as_png(index).unwrap() {
            Some(data) => data,
            None => {
                eprintln!("{} has only {} images", path, icons.len());
                std::process::exit(1);
            }
        };
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{}.{}.png", path, index))
        };
        fs::write(out_path, data).unwrap();
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap();
        let mut icons = IconSet::open(path).unwrap();
        if submatches.is_present("largest") {
            icons.sort_icons(
                IconSort::ByResolutionDescending,
                IconSort::ByBppDescending,
            );
        }
        for (index, icon) in icons.icons().iter().enumerate() {
            println!("{:5}: {}", index, icon);
        }
    }
}

//===========================================================================//
