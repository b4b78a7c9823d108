// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Catalog of artworks to hang in the gallery.

use super::artwork::ArtworkMetadata;
use serde::{Deserialize, Serialize};

/// One catalog entry: what to show and where its image lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    #[serde(flatten)]
    pub metadata: ArtworkMetadata,
    /// File path or http(s) URL of the image
    pub image: String,
}

impl ArtworkRecord {
    pub fn new(title: &str, artist: &str, year: &str, description: &str, image: &str) -> Self {
        Self {
            metadata: ArtworkMetadata {
                title: title.to_string(),
                artist: artist.to_string(),
                year: year.to_string(),
                description: description.to_string(),
            },
            image: image.to_string(),
        }
    }
}

/// The collection shown when no configuration file is given.
pub fn default_catalog() -> Vec<ArtworkRecord> {
    vec![
        ArtworkRecord::new(
            "The Starry Night",
            "Vincent van Gogh",
            "1889",
            "The night view outside the window of the Saint-Remy asylum, one of Van Gogh's best known works.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/e/ea/Van_Gogh_-_Starry_Night_-_Google_Art_Project.jpg/1200px-Van_Gogh_-_Starry_Night_-_Google_Art_Project.jpg",
        ),
        ArtworkRecord::new(
            "Mona Lisa",
            "Leonardo da Vinci",
            "1503-1519",
            "A portrait famous for its mysterious smile and elusive expression.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/e/ec/Mona_Lisa%2C_by_Leonardo_da_Vinci%2C_from_C2RMF_retouched.jpg/800px-Mona_Lisa%2C_by_Leonardo_da_Vinci%2C_from_C2RMF_retouched.jpg",
        ),
        ArtworkRecord::new(
            "The Scream",
            "Edvard Munch",
            "1893",
            "An expressionist figure twisted by the anxiety and despair of modern life.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c5/Edvard_Munch%2C_1893%2C_The_Scream%2C_oil%2C_tempera_and_pastel_on_cardboard%2C_91_x_73_cm%2C_National_Gallery_of_Norway.jpg/800px-Edvard_Munch%2C_1893%2C_The_Scream%2C_oil%2C_tempera_and_pastel_on_cardboard%2C_91_x_73_cm%2C_National_Gallery_of_Norway.jpg",
        ),
        ArtworkRecord::new(
            "Water Lilies",
            "Claude Monet",
            "1916",
            "One of the water lily paintings of Monet's later years, a study of light and color.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a0/Claude_Monet_-_Water_Lilies_-_1906%2C_Ryerson.jpg/800px-Claude_Monet_-_Water_Lilies_-_1906%2C_Ryerson.jpg",
        ),
        ArtworkRecord::new(
            "Sunflowers",
            "Vincent van Gogh",
            "1888",
            "A still life from the sunflower series, known for its vivid yellows and bold brushwork.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/4/46/Vincent_Willem_van_Gogh_127.jpg/800px-Vincent_Willem_van_Gogh_127.jpg",
        ),
        ArtworkRecord::new(
            "Guernica",
            "Pablo Picasso",
            "1937",
            "A mural of the bombing of Guernica during the Spanish Civil War and one of the most famous anti-war works of the century.",
            "https://upload.wikimedia.org/wikipedia/en/7/74/PicassoGuernica.jpg",
        ),
        ArtworkRecord::new(
            "The Persistence of Memory",
            "Salvador Dali",
            "1931",
            "Melting clocks in a desolate landscape, a surrealist meditation on time and memory.",
            "https://uploads6.wikiart.org/images/salvador-dali/the-persistence-of-memory-1931.jpg",
        ),
        ArtworkRecord::new(
            "The Night Cafe",
            "Vincent van Gogh",
            "1888",
            "A night cafe in Arles, painted with strong color contrasts and raw emotion.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5e/Vincent_Willem_van_Gogh_076.jpg/800px-Vincent_Willem_van_Gogh_076.jpg",
        ),
    ]
}
