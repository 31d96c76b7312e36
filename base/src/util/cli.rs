use std::fmt::Debug;
use std::io::{stdin, stdout, BufReader, BufWriter};
use std::path::PathBuf;
use std::str::FromStr;

use arrayvec::ArrayVec;
use structopt::StructOpt;

use crate::defs::{Error, ErrorKind::*, Result};
use crate::document::Document;
use crate::util::fs;

#[derive(Clone, Copy, Debug)]
pub struct Array<T: FromStr, const N: usize>(pub [T; N]);

impl<T: Debug + Default + FromStr, const N: usize> FromStr for Array<T, N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed_err = || {
            let desc = format!("malformed value array '{}'", s);
            Error::new(MalformedData, desc)
        };

        let parse = |iter: &mut std::str::Split<char>| {
            let part = iter.next().ok_or_else(malformed_err)?;
            if part.is_empty() {
                Ok(T::default())
            } else {
                part.parse::<T>().map_err(|_| malformed_err())
            }
        };

        let mut iter = s.split(',');
        let mut vec = ArrayVec::<T, N>::new();

        for _ in 0..N {
            vec.push(parse(&mut iter)?);
        }

        if iter.next().is_some() {
            return Err(malformed_err());
        }

        Ok(Array(vec.into_inner().map_err(|_| malformed_err())?))
    }
}

impl<T: FromStr, const N: usize> From<[T; N]> for Array<T, N> {
    fn from(array: [T; N]) -> Self {
        Self(array)
    }
}

#[derive(StructOpt)]
pub struct DocumentInput {
    #[structopt(
        help = "Input document .json file (STDIN if omitted)",
        name = "in-file"
    )]
    pub path: Option<PathBuf>,
}

impl DocumentInput {
    pub fn read(&self) -> Result<Document> {
        if let Some(path) = &self.path {
            Document::read(BufReader::new(fs::open_file(path)?))
        } else {
            Document::read(BufReader::new(stdin()))
        }
    }
}

#[derive(StructOpt)]
pub struct DocumentOutput {
    #[structopt(
        help = "Output document .json file (STDOUT if omitted)",
        long = "out-file",
        short = "o"
    )]
    pub path: Option<PathBuf>,
}

impl DocumentOutput {
    pub fn write(&self, doc: &Document) -> Result<()> {
        if let Some(path) = &self.path {
            doc.write(BufWriter::new(fs::create_file(path)?))
        } else {
            doc.write(BufWriter::new(stdout()))
        }
    }
}
