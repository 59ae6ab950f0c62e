// Single-entity lookups: tracks, artists, albums, playlists, podcasts.
impl DeezerClient {
    pub async fn get_track(&self, id: &str) -> CatalogResult<Track> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("track/{id}"), &[]).await?;
        Ok(normalize::track(&json))
    }

    pub async fn get_artist(&self, id: &str) -> CatalogResult<Artist> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("artist/{id}"), &[]).await?;
        Ok(normalize::artist(&json))
    }

    pub async fn get_artist_top_tracks(&self, id: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        let id = required_id("id", id)?;
        let limit = limit.to_string();
        let json = self
            .fetch(&format!("artist/{id}/top"), &[("limit", &limit)])
            .await?;
        Ok(normalize::tracks(normalize::data_items(&json)))
    }

    /// Artist record with `top_tracks` filled in. Both requests run
    /// concurrently and either failing fails the whole.
    pub async fn get_artist_with_top_tracks(&self, id: &str, limit: u32) -> CatalogResult<Artist> {
        let id = required_id("id", id)?;
        let (mut artist, top_tracks) =
            try_join(self.get_artist(id), self.get_artist_top_tracks(id, limit)).await?;
        artist.top_tracks = top_tracks;
        Ok(artist)
    }

    pub async fn get_album(&self, id: &str) -> CatalogResult<Album> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("album/{id}"), &[]).await?;
        Ok(normalize::album(&json))
    }

    pub async fn get_album_tracks(&self, id: &str) -> CatalogResult<Vec<Track>> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("album/{id}/tracks"), &[]).await?;
        if !normalize::has_data(&json) {
            return Err(CatalogError::NotFound("No tracks found"));
        }
        Ok(normalize::tracks(normalize::data_items(&json)))
    }

    pub async fn get_playlist(&self, id: &str) -> CatalogResult<Playlist> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("playlist/{id}"), &[]).await?;
        Ok(normalize::playlist(&json))
    }

    pub async fn get_podcast(&self, id: &str) -> CatalogResult<Podcast> {
        let id = required_id("id", id)?;
        let json = self.fetch(&format!("podcast/{id}"), &[]).await?;
        Ok(normalize::podcast(&json))
    }
}
