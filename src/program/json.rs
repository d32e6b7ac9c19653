use super::ConicProgram;
use crate::algebra::*;

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

impl<T> ConicProgram<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Write the program, including any solution values it holds, to a JSON file.
    pub fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Read a program from a JSON file written by [`save_to_file`](ConicProgram::save_to_file).
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if the stored membership
    /// records are inconsistent.
    pub fn load_from_file(file: &mut File) -> Result<Self, io::Error> {
        // read file
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let program: Self = serde_json::from_str(&buffer)?;

        program
            .check_consistency()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(program)
    }
}
