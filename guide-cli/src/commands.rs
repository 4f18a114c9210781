//! Guide and point of interest commands.
//!
//! Each command runs against any [`GuideStore`] and writes one JSON document
//! to the supplied writer.

use std::io::Write;

use clap::{Args, Subcommand};
use guide_core::{
    CoordinateSource, EntityOptions, Guide, GuideId, GuideStore, PoiId, PointOfInterest,
};
use log::info;
use serde::Serialize;

use crate::CliError;

const GUIDE: &str = "guide";
const POI: &str = "point of interest";

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// Create a guide.
    AddGuide {
        /// Display name of the guide.
        name: String,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// List guides, optionally only those whose name starts with a prefix.
    ListGuides {
        /// Case-sensitive name prefix.
        #[arg(long, value_name = "prefix")]
        query: Option<String>,
    },
    /// Show a guide together with its points of interest.
    ShowGuide {
        /// Guide identifier.
        guide_id: i64,
    },
    /// Change a guide's name, description or coordinate.
    EditGuide {
        /// Guide identifier.
        guide_id: i64,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Delete a guide and its points of interest.
    RemoveGuide {
        /// Guide identifier.
        guide_id: i64,
    },
    /// Print the number of guides.
    CountGuides,
    /// Add a point of interest to a guide.
    AddPoi {
        /// Guide the point of interest belongs to.
        guide_id: i64,
        /// Display name of the point of interest.
        name: String,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// List the points of interest of a guide.
    ListPois {
        /// Guide identifier.
        guide_id: i64,
    },
    /// Show one point of interest.
    ShowPoi {
        /// Guide identifier.
        guide_id: i64,
        /// Point of interest identifier.
        poi_id: i64,
    },
    /// Change a point of interest's name, description or coordinate.
    EditPoi {
        /// Guide identifier.
        guide_id: i64,
        /// Point of interest identifier.
        poi_id: i64,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Delete a point of interest.
    RemovePoi {
        /// Guide identifier.
        guide_id: i64,
        /// Point of interest identifier.
        poi_id: i64,
    },
}

/// Coordinate as typed on the command line.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CoordinateArgs {
    /// Latitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_hyphen_values = true)]
    pub(crate) latitude: Option<String>,
    /// Longitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_hyphen_values = true)]
    pub(crate) longitude: Option<String>,
}

impl CoordinateArgs {
    /// Text source for the coordinate, if either axis was given. A missing
    /// axis becomes empty text and fails validation.
    fn source(&self) -> Option<CoordinateSource> {
        if self.latitude.is_none() && self.longitude.is_none() {
            return None;
        }
        Some(CoordinateSource::Text {
            latitude: self.latitude.clone().unwrap_or_default(),
            longitude: self.longitude.clone().unwrap_or_default(),
        })
    }
}

/// Optional attributes for new entities.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct DetailArgs {
    /// Free-form description.
    #[arg(long, value_name = "text")]
    pub(crate) description: Option<String>,
    #[command(flatten)]
    pub(crate) coordinate: CoordinateArgs,
}

impl DetailArgs {
    fn into_options(self) -> EntityOptions {
        EntityOptions {
            coordinate: self.coordinate.source(),
            description: self.description,
        }
    }
}

/// Changes applied to an existing entity. Omitted fields are left alone.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct EditArgs {
    /// New display name.
    #[arg(long, value_name = "text")]
    pub(crate) name: Option<String>,
    /// New description.
    #[arg(long, value_name = "text", conflicts_with = "clear_description")]
    pub(crate) description: Option<String>,
    /// Remove the description.
    #[arg(long)]
    pub(crate) clear_description: bool,
    #[command(flatten)]
    pub(crate) coordinate: CoordinateArgs,
}

/// Entities whose name, description and coordinate can be edited.
trait Editable {
    fn set_name(&mut self, name: String) -> Result<(), guide_core::ValidationError>;
    fn set_description(&mut self, description: Option<String>);
    fn set_coordinate(&mut self, coordinate: guide_core::Coordinate);
}

impl Editable for Guide {
    fn set_name(&mut self, name: String) -> Result<(), guide_core::ValidationError> {
        Self::set_name(self, name)
    }

    fn set_description(&mut self, description: Option<String>) {
        Self::set_description(self, description);
    }

    fn set_coordinate(&mut self, coordinate: guide_core::Coordinate) {
        Self::set_coordinate(self, coordinate);
    }
}

impl Editable for PointOfInterest {
    fn set_name(&mut self, name: String) -> Result<(), guide_core::ValidationError> {
        Self::set_name(self, name)
    }

    fn set_description(&mut self, description: Option<String>) {
        Self::set_description(self, description);
    }

    fn set_coordinate(&mut self, coordinate: guide_core::Coordinate) {
        Self::set_coordinate(self, coordinate);
    }
}

impl EditArgs {
    /// Apply the edits. Validation happens before anything is changed.
    fn apply(self, entity: &mut impl Editable) -> Result<(), CliError> {
        let coordinate = self
            .coordinate
            .source()
            .map(|source| source.resolve())
            .transpose()?;
        if let Some(name) = self.name {
            entity.set_name(name)?;
        }
        if self.clear_description {
            entity.set_description(None);
        } else if let Some(description) = self.description {
            entity.set_description(Some(description));
        }
        if let Some(resolved) = coordinate {
            entity.set_coordinate(resolved);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct GuideView {
    guide: Guide,
    points_of_interest: Vec<PointOfInterest>,
}

#[derive(Debug, Serialize)]
struct CountView {
    count: u64,
}

#[derive(Debug, Serialize)]
struct RemovedView {
    removed: bool,
}

/// Run `command` against `store`, writing the JSON result to `out`.
pub(crate) fn execute<S, W>(command: Command, store: &mut S, out: &mut W) -> Result<(), CliError>
where
    S: GuideStore,
    W: Write,
{
    match command {
        Command::AddGuide { name, details } => {
            let mut guide = Guide::new(name, details.into_options())?;
            let id = store.create_guide(&mut guide)?;
            info!("added guide {id}");
            render(out, &guide)
        }
        Command::ListGuides { query } => {
            let guides = match query {
                Some(prefix) => store.search(&prefix)?,
                None => store.get_all_guides()?,
            };
            render(out, &guides)
        }
        Command::ShowGuide { guide_id } => {
            let id = GuideId::new(guide_id);
            let guide = require_guide(store, id)?;
            let points_of_interest = store.get_all_pois(id)?;
            render(
                out,
                &GuideView {
                    guide,
                    points_of_interest,
                },
            )
        }
        Command::EditGuide { guide_id, edit } => {
            let mut guide = require_guide(store, GuideId::new(guide_id))?;
            edit.apply(&mut guide)?;
            store.update_guide(&guide)?;
            render(out, &guide)
        }
        Command::RemoveGuide { guide_id } => {
            let id = GuideId::new(guide_id);
            let removed = store.get_guide(id)?.is_some();
            store.delete_guide(id)?;
            render(out, &RemovedView { removed })
        }
        Command::CountGuides => {
            let count = store.count_guides()?;
            render(out, &CountView { count })
        }
        Command::AddPoi {
            guide_id,
            name,
            details,
        } => {
            let mut poi =
                PointOfInterest::new(name, GuideId::new(guide_id), details.into_options())?;
            let id = store.create_poi(&mut poi)?;
            info!("added point of interest {id} to guide {guide_id}");
            render(out, &poi)
        }
        Command::ListPois { guide_id } => {
            let id = GuideId::new(guide_id);
            require_guide(store, id)?;
            render(out, &store.get_all_pois(id)?)
        }
        Command::ShowPoi { guide_id, poi_id } => {
            let poi = require_poi(store, GuideId::new(guide_id), PoiId::new(poi_id))?;
            render(out, &poi)
        }
        Command::EditPoi {
            guide_id,
            poi_id,
            edit,
        } => {
            let mut poi = require_poi(store, GuideId::new(guide_id), PoiId::new(poi_id))?;
            edit.apply(&mut poi)?;
            store.update_poi(&poi)?;
            render(out, &poi)
        }
        Command::RemovePoi { guide_id, poi_id } => {
            let (guide, poi) = (GuideId::new(guide_id), PoiId::new(poi_id));
            let removed = store.get_poi(guide, poi)?.is_some();
            store.delete_poi(guide, poi)?;
            render(out, &RemovedView { removed })
        }
    }
}

fn require_guide(store: &impl GuideStore, id: GuideId) -> Result<Guide, CliError> {
    store.get_guide(id)?.ok_or(CliError::NotFound {
        entity: GUIDE,
        id: id.get(),
    })
}

fn require_poi(
    store: &impl GuideStore,
    guide_id: GuideId,
    poi_id: PoiId,
) -> Result<PointOfInterest, CliError> {
    store.get_poi(guide_id, poi_id)?.ok_or(CliError::NotFound {
        entity: POI,
        id: poi_id.get(),
    })
}

fn render<W: Write>(out: &mut W, value: &impl Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(CliError::Serialize)?;
    writeln!(out).map_err(CliError::WriteOutput)
}
