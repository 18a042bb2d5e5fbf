//! Demo catalog loaded into an empty database

use super::entity::{catalog, recording, store, store_inventory};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};

struct DemoRecording {
    title: &'static str,
    artist: &'static str,
    genre: &'static str,
    subgenre: &'static str,
    release_year: i32,
    publisher: &'static str,
    media_type: &'static str,
    retail_price_cents: i64,
}

const RECORDINGS: &[DemoRecording] = &[
    DemoRecording {
        title: "Thriller",
        artist: "Michael Jackson",
        genre: "Pop",
        subgenre: "Dance-pop",
        release_year: 1982,
        publisher: "Epic",
        media_type: "CD",
        retail_price_cents: 1200,
    },
    DemoRecording {
        title: "Back in Black",
        artist: "AC/DC",
        genre: "Rock",
        subgenre: "Hard Rock",
        release_year: 1980,
        publisher: "Atlantic",
        media_type: "Vinyl",
        retail_price_cents: 1500,
    },
    DemoRecording {
        title: "The Dark Side of the Moon",
        artist: "Pink Floyd",
        genre: "Rock",
        subgenre: "Progressive Rock",
        release_year: 1973,
        publisher: "Harvest",
        media_type: "CD",
        retail_price_cents: 1300,
    },
    DemoRecording {
        title: "Abbey Road",
        artist: "The Beatles",
        genre: "Rock",
        subgenre: "Pop Rock",
        release_year: 1969,
        publisher: "Apple",
        media_type: "Vinyl",
        retail_price_cents: 1800,
    },
    DemoRecording {
        title: "Kind of Blue",
        artist: "Miles Davis",
        genre: "Jazz",
        subgenre: "Modal Jazz",
        release_year: 1959,
        publisher: "Columbia",
        media_type: "CD",
        retail_price_cents: 1100,
    },
    DemoRecording {
        title: "Nevermind",
        artist: "Nirvana",
        genre: "Rock",
        subgenre: "Grunge",
        release_year: 1991,
        publisher: "DGC",
        media_type: "CD",
        retail_price_cents: 1400,
    },
    DemoRecording {
        title: "Highway to Hell",
        artist: "AC/DC",
        genre: "Rock",
        subgenre: "Hard Rock",
        release_year: 1979,
        publisher: "Atlantic",
        media_type: "Flash Drive",
        retail_price_cents: 900,
    },
];

/// (name, address, phone, [(recording index, wholesale cents, sales count, in stock)])
type DemoStore = (&'static str, &'static str, &'static str, &'static [(usize, i64, i32, i32)]);

const STORES: &[DemoStore] = &[
    (
        "Central Music Store",
        "1 Main St",
        "555-0100",
        &[
            (0, 800, 120, 25),
            (1, 1100, 85, 15),
            (2, 900, 95, 0),
            (3, 1300, 70, 10),
            (4, 750, 50, 5),
            (5, 1000, 110, 0),
        ],
    ),
    (
        "Music World",
        "42 Lenin Ave",
        "555-0142",
        &[(0, 820, 100, 20), (2, 920, 85, 5), (4, 780, 60, 0), (6, 600, 45, 12)],
    ),
];

/// Insert the demo catalog, stores and inventory unless recordings already exist
///
/// Returns whether anything was written.
pub async fn seed_demo_data(db: &DatabaseConnection) -> anyhow::Result<bool> {
    if recording::Entity::find().count(db).await? > 0 {
        tracing::info!("Database already has recordings, skipping demo data");
        return Ok(false);
    }

    let txn = db.begin().await?;

    let mut recording_ids = Vec::with_capacity(RECORDINGS.len());
    for demo in RECORDINGS {
        let created = recording::ActiveModel {
            id: NotSet,
            title: Set(demo.title.to_string()),
            artist: Set(demo.artist.to_string()),
            genre: Set(demo.genre.to_string()),
            subgenre: Set(Some(demo.subgenre.to_string())),
            release_year: Set(demo.release_year),
            publisher: Set(demo.publisher.to_string()),
            media_type: Set(demo.media_type.to_string()),
            image_url: Set(super::mapper::DEFAULT_IMAGE.to_string()),
        }
        .insert(&txn)
        .await?;

        catalog::ActiveModel {
            id: NotSet,
            recording_id: Set(created.id),
            retail_price_cents: Set(demo.retail_price_cents),
            media_type: Set(demo.media_type.to_string()),
        }
        .insert(&txn)
        .await?;

        recording_ids.push(created.id);
    }

    for (name, address, phone, stock) in STORES {
        let created = store::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            address: Set(address.to_string()),
            phone: Set(phone.to_string()),
        }
        .insert(&txn)
        .await?;

        for &(index, wholesale_cents, sales_count, in_stock) in stock.iter() {
            let recording_id = recording_ids
                .get(index)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("demo inventory refers to recording #{}", index))?;

            store_inventory::ActiveModel {
                id: NotSet,
                store_id: Set(created.id),
                recording_id: Set(recording_id),
                wholesale_price_cents: Set(wholesale_cents),
                in_stock: Set(in_stock),
                sales_count: Set(sales_count),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    tracing::info!(
        recordings = RECORDINGS.len(),
        stores = STORES.len(),
        "Demo data loaded"
    );
    Ok(true)
}
