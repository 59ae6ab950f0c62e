// Charts, genre listings, and genre landing pages.
impl DeezerClient {
    pub async fn get_chart(&self) -> CatalogResult<Chart> {
        let json = self.fetch("chart", &[]).await?;
        Ok(normalize::chart(&json))
    }

    pub async fn get_top_tracks(&self, limit: usize) -> CatalogResult<Vec<Track>> {
        let json = self.fetch("chart", &[]).await?;
        let segment = json.get("tracks").unwrap_or(&Value::Null);
        if !normalize::has_data(segment) {
            return Err(CatalogError::NotFound("No top tracks found"));
        }
        let mut tracks = normalize::tracks(normalize::data_items(segment));
        tracks.truncate(limit);
        Ok(tracks)
    }

    pub async fn get_top_podcasts(&self, limit: u32) -> CatalogResult<Vec<Podcast>> {
        let limit = limit.to_string();
        let json = self.fetch("chart/0/podcasts", &[("limit", &limit)]).await?;
        Ok(normalize::data_items(&json)
            .iter()
            .map(normalize::podcast)
            .collect())
    }

    pub async fn get_top_genres(&self) -> CatalogResult<Vec<Genre>> {
        let json = self.fetch("chart/0/genres", &[]).await?;
        Ok(normalize::data_items(&json)
            .iter()
            .map(normalize::genre)
            .collect())
    }

    /// Distinct genres of the chart tracks, in chart order.
    pub async fn get_top_genres_from_tracks(&self) -> CatalogResult<Vec<Genre>> {
        let json = self.fetch("chart", &[]).await?;
        let mut genres: Vec<Genre> = Vec::new();
        for genre in normalize::nested_items(&json, "tracks")
            .iter()
            .filter_map(normalize::track_genre)
        {
            if !genres.iter().any(|seen| seen.id == genre.id) {
                genres.push(genre);
            }
        }
        Ok(genres)
    }

    pub async fn get_genres(&self) -> CatalogResult<Vec<Genre>> {
        let json = self.fetch("genre", &[]).await?;
        Ok(normalize::data_items(&json)
            .iter()
            .map(normalize::genre)
            .collect())
    }

    pub async fn get_genre(&self, id: &str) -> CatalogResult<Genre> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("genre/{id}"), &[]).await?;
        Ok(normalize::genre(&json))
    }

    /// Artists and radios for a genre, fetched concurrently.
    pub async fn get_genre_top(&self, id: &str) -> CatalogResult<GenreTop> {
        let id = required_id("id", id)?;
        let artists_path = format!("genre/{id}/artists");
        let radios_path = format!("genre/{id}/radios");
        let (artists, radios) = try_join(
            self.fetch(&artists_path, &[]),
            self.fetch(&radios_path, &[]),
        )
        .await?;

        Ok(GenreTop {
            artists: normalize::data_items(&artists)
                .iter()
                .map(normalize::artist)
                .collect(),
            radios: normalize::data_items(&radios)
                .iter()
                .map(normalize::radio)
                .collect(),
        })
    }
}
