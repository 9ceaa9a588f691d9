//! # Storage de Archivos
//! src/storage.rs
//!
//! Colaborador externo detrás de las rutas `/files/`. Se modela como un
//! almacén clave/bytes donde la clave es el nombre de archivo y todo vive
//! bajo un directorio raíz configurado.
//!
//! No hay locks: dos escrituras concurrentes al mismo nombre compiten y
//! gana la última.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errores del storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// El archivo no existe
    #[error("file not found: {0}")]
    NotFound(String),

    /// El nombre es vacío o escaparía del directorio raíz
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Cualquier otro error de I/O
    #[error("I/O error on {filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: io::Error,
    },
}

/// Almacén de bytes indexado por nombre de archivo
pub trait Storage: Send + Sync {
    /// Lee el contenido completo del archivo
    fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError>;

    /// Crea o reemplaza el archivo con `contents`
    fn write(&self, filename: &str, contents: &[u8]) -> Result<(), StorageError>;
}

/// Storage respaldado por el sistema de archivos
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Une `filename` a la raíz
    ///
    /// Solo se aceptan componentes normales y `.`: nada de `..`, rutas
    /// absolutas ni nombres sin un componente normal. Se permiten
    /// subdirectorios (`a/b.txt`).
    fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(filename);
        let mut has_normal = false;

        for component in relative.components() {
            match component {
                Component::Normal(_) => has_normal = true,
                Component::CurDir => {}
                _ => return Err(StorageError::InvalidName(filename.to_string())),
            }
        }

        if !has_normal {
            return Err(StorageError::InvalidName(filename.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl Storage for FileStorage {
    fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(filename)?;

        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(filename.to_string()),
            _ => StorageError::Io {
                filename: filename.to_string(),
                source: e,
            },
        })
    }

    fn write(&self, filename: &str, contents: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(filename)?;

        fs::write(&path, contents).map_err(|e| StorageError::Io {
            filename: filename.to_string(),
            source: e,
        })
    }
}
